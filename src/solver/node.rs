use std::fmt::{self, Debug, Formatter};

use crate::state::State;

/// A node of the search tree.
///
/// Nodes live in an arena for the whole search so children can point at their parent
/// without reference counting.
pub struct Node<'a, 'b> {
    pub state: State<'b>,
    /// Moves from the initial state.
    pub g: u32,
    /// Only best-first search evaluates the heuristic.
    pub h: Option<u32>,
    parent: Option<&'a Node<'a, 'b>>,
}

impl<'a, 'b> Node<'a, 'b> {
    pub fn root(state: State<'b>, h: Option<u32>) -> Self {
        Node {
            state,
            g: 0,
            h,
            parent: None,
        }
    }

    pub fn child(parent: &'a Node<'a, 'b>, state: State<'b>, h: Option<u32>) -> Self {
        Node {
            state,
            g: parent.g + 1,
            h,
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&'a Node<'a, 'b>> {
        self.parent
    }

    pub fn f(&self) -> u32 {
        self.g + self.h.unwrap_or(0)
    }

    /// States from the root to this node - `g + 1` of them.
    pub fn path(&self) -> Vec<&State<'b>> {
        let mut states = vec![&self.state];
        let mut cur = self.parent;
        while let Some(node) = cur {
            states.push(&node.state);
            cur = node.parent;
        }
        states.reverse();
        states
    }
}

impl Debug for Node<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("g", &self.g)
            .field("h", &self.h)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
