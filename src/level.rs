use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::data::Pos;
use crate::map::{Board, BoardErr};
use crate::state::State;

/// A board together with the initial hero and box positions.
#[derive(Clone)]
pub struct Level {
    board: Board,
    hero: Pos,
    boxes: Vec<Pos>,
}

impl Level {
    pub fn new(board: Board, hero: Pos, boxes: Vec<Pos>) -> Result<Level, BoardErr> {
        if board.is_wall(hero) {
            return Err(BoardErr::HeroOnWall);
        }
        let mut seen = FnvHashSet::default();
        for &pos in &boxes {
            if board.is_wall(pos) {
                return Err(BoardErr::BoxOnWall(pos));
            }
            if !seen.insert(pos) {
                return Err(BoardErr::DuplicateBox(pos));
            }
        }
        if boxes.len() != board.shelves().len() {
            return Err(BoardErr::BoxesShelves);
        }

        Ok(Level { board, hero, boxes })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hero(&self) -> Pos {
        self.hero
    }

    pub fn initial_boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn initial_state(&self) -> State<'_> {
        State::new(&self.board, self.hero, self.boxes.clone())
    }

    /// Renders `state` on this level's board in XSB.
    pub fn xsb<'s>(&'s self, state: &'s State<'_>) -> StateFormatter<'s> {
        StateFormatter::new(&self.board, state.hero(), state.boxes())
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", StateFormatter::new(&self.board, self.hero, &self.boxes))
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// XSB rendering of a board with the hero and boxes placed on it.
#[derive(Clone, Copy)]
pub struct StateFormatter<'a> {
    board: &'a Board,
    hero: Pos,
    boxes: &'a [Pos],
}

impl<'a> StateFormatter<'a> {
    pub(crate) fn new(board: &'a Board, hero: Pos, boxes: &'a [Pos]) -> Self {
        StateFormatter { board, hero, boxes }
    }

    fn cell(&self, pos: Pos) -> char {
        let has_box = self.boxes.contains(&pos);
        match (self.board.is_wall(pos), self.board.is_shelf(pos)) {
            (true, _) => '#',
            (false, true) if has_box => '*',
            (false, true) if pos == self.hero => '+',
            (false, true) => '.',
            (false, false) if has_box => '$',
            (false, false) if pos == self.hero => '@',
            (false, false) => ' ',
        }
    }
}

impl Display for StateFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bounds = self.board.bounds();
        for y in bounds.min.y..=bounds.max.y {
            let line: String = (bounds.min.x..=bounds.max.x)
                .map(|x| self.cell(Pos::new(x, y)))
                .collect();
            // don't print trailing empty cells to match the input level strings
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl Debug for StateFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
