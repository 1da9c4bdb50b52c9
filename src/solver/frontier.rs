use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::Method;

use super::node::Node;

/// The open list - depth-first and best-first only differ in which node comes out next.
#[derive(Debug)]
pub(crate) enum Frontier<'a, 'b> {
    Stack(Vec<&'a Node<'a, 'b>>),
    Queue(BinaryHeap<Ranked<'a, 'b>>, u64),
}

impl<'a, 'b> Frontier<'a, 'b> {
    pub(crate) fn new(method: Method) -> Self {
        match method {
            Method::DepthFirst => Frontier::Stack(Vec::new()),
            Method::BestFirst => Frontier::Queue(BinaryHeap::new(), 0),
        }
    }

    pub(crate) fn insert(&mut self, node: &'a Node<'a, 'b>) {
        match self {
            Frontier::Stack(stack) => stack.push(node),
            Frontier::Queue(heap, inserted) => {
                heap.push(Ranked {
                    node,
                    seq: *inserted,
                });
                *inserted += 1;
            }
        }
    }

    pub(crate) fn pop(&mut self) -> Option<&'a Node<'a, 'b>> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(heap, _) => heap.pop().map(|ranked| ranked.node),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(heap, _) => heap.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub(crate) struct Ranked<'a, 'b> {
    node: &'a Node<'a, 'b>,
    seq: u64,
}

impl Ord for Ranked<'_, '_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap - lowest f first,
        // on ties the deeper node, then the one queued earlier
        other
            .node
            .f()
            .cmp(&self.node.f())
            .then_with(|| self.node.g.cmp(&other.node.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Ranked<'_, '_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_, '_> {}
