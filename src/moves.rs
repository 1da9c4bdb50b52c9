use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;
use crate::state::State;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub dir: Dir,
    pub is_push: bool,
}

impl Move {
    pub fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }

    /// Lowercase for a step, uppercase for a push.
    pub fn to_char(self) -> char {
        let c = match self.dir {
            Dir::Left => 'l',
            Dir::Right => 'r',
            Dir::Up => 'u',
            Dir::Down => 'd',
        };
        if self.is_push {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    /// Reconstructs the moves between consecutive states of a solution path.
    ///
    /// Pairs that are not a single move apart are skipped.
    pub fn from_states(states: &[State<'_>]) -> Self {
        let mut moves = Moves::default();
        for pair in states.windows(2) {
            if let Some(dir) = pair[0].hero().dir_to(pair[1].hero()) {
                moves.add(Move::new(dir, pair[0].boxes() != pair[1].boxes()));
            }
        }
        moves
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let line: String = self.0.iter().map(|mov| mov.to_char()).collect();
        write!(f, "{}", line)
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
