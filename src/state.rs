use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use fnv::FnvHasher;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Board;
use crate::solver::deadends::DeadEnds;

/// Hero and box positions - the board itself is shared by all states of one search.
///
/// Boxes are kept sorted so two states reached by moving boxes in a different order
/// compare equal.
#[derive(Clone)]
pub struct State<'b> {
    board: &'b Board,
    hero: Pos,
    boxes: Vec<Pos>,
    hash: u64,
}

impl<'b> State<'b> {
    pub fn new(board: &'b Board, hero: Pos, mut boxes: Vec<Pos>) -> State<'b> {
        boxes.sort();

        let mut hasher = FnvHasher::default();
        hero.hash(&mut hasher);
        boxes.hash(&mut hasher);
        let hash = hasher.finish();

        State {
            board,
            hero,
            boxes,
            hash,
        }
    }

    pub fn board(&self) -> &'b Board {
        self.board
    }

    pub fn hero(&self) -> Pos {
        self.hero
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// The state after the hero moves one cell in `dir`, pushing a box if there is one.
    ///
    /// Returns `None` when the hero would walk into a wall or the box
    /// can't be pushed because there is a wall or another box behind it.
    /// Leaving the bounds of the board counts as hitting a wall.
    pub fn transition(&self, dir: Dir) -> Option<State<'b>> {
        let new_hero = self.hero + dir;
        if self.board.is_blocked(new_hero) {
            return None;
        }

        match self.boxes.binary_search(&new_hero) {
            Err(_) => Some(State::new(self.board, new_hero, self.boxes.clone())),
            Ok(box_index) => {
                let landing = new_hero + dir;
                if self.board.is_blocked(landing) || self.has_box(landing) {
                    return None;
                }
                let mut new_boxes = self.boxes.clone();
                new_boxes[box_index] = landing;
                Some(State::new(self.board, new_hero, new_boxes))
            }
        }
    }

    /// All states reachable by one move, in `DIRECTIONS` order.
    pub fn expand(&self) -> Vec<State<'b>> {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| self.transition(dir))
            .collect()
    }

    pub fn is_goal(&self) -> bool {
        self.boxes[..] == *self.board.sorted_shelves()
    }

    pub fn contains_deadend(&self, dead_ends: &DeadEnds) -> bool {
        self.boxes.iter().any(|&b| dead_ends.contains(b))
    }
}

// The cached hash only rejects quickly, equal hashes still need the full comparison.
impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.hero == other.hero && self.boxes == other.boxes
    }
}

impl Eq for State<'_> {}

impl Hash for State<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Debug for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("hero", &self.hero)
            .field("boxes", &self.boxes)
            .finish()
    }
}
