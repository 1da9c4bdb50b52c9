use std::error::Error;
use std::fmt::{self, Display, Formatter};

use fnv::FnvHashSet;

use crate::data::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardErr {
    NoWalls,
    WallOnShelf(Pos),
    HeroOnWall,
    BoxOnWall(Pos),
    DuplicateBox(Pos),
    BoxesShelves,
}

impl Display for BoardErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            BoardErr::NoWalls => write!(f, "No walls - can't determine board bounds"),
            BoardErr::WallOnShelf(pos) => write!(f, "Wall on shelf at [{}, {}]", pos.x, pos.y),
            BoardErr::HeroOnWall => write!(f, "Hero is on a wall"),
            BoardErr::BoxOnWall(pos) => write!(f, "Box on wall at [{}, {}]", pos.x, pos.y),
            BoardErr::DuplicateBox(pos) => {
                write!(f, "More than one box at [{}, {}]", pos.x, pos.y)
            }
            BoardErr::BoxesShelves => write!(f, "Different number of boxes and shelves"),
        }
    }
}

impl Error for BoardErr {}

/// Inclusive bounding box of the walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Pos,
    pub max: Pos,
}

impl Bounds {
    fn of(positions: &FnvHashSet<Pos>) -> Option<Bounds> {
        let mut iter = positions.iter();
        let first = *iter.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for pos in iter {
            bounds.min.x = bounds.min.x.min(pos.x);
            bounds.min.y = bounds.min.y.min(pos.y);
            bounds.max.x = bounds.max.x.max(pos.x);
            bounds.max.y = bounds.max.y.max(pos.y);
        }
        Some(bounds)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Row by row, left to right.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let Bounds { min, max } = *self;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Pos::new(x, y)))
    }
}

/// Static geometry of one puzzle - shared by all states.
#[derive(Debug, Clone)]
pub struct Board {
    walls: FnvHashSet<Pos>,
    shelves: FnvHashSet<Pos>,
    // sorted the same way as `State::boxes` so the goal test is a slice comparison
    sorted_shelves: Vec<Pos>,
    bounds: Bounds,
}

impl Board {
    pub fn new<W, S>(walls: W, shelves: S) -> Result<Board, BoardErr>
    where
        W: IntoIterator<Item = Pos>,
        S: IntoIterator<Item = Pos>,
    {
        let walls: FnvHashSet<Pos> = walls.into_iter().collect();
        let shelves: FnvHashSet<Pos> = shelves.into_iter().collect();

        if let Some(&pos) = shelves.iter().find(|pos| walls.contains(pos)) {
            return Err(BoardErr::WallOnShelf(pos));
        }
        let bounds = Bounds::of(&walls).ok_or(BoardErr::NoWalls)?;

        let mut sorted_shelves: Vec<_> = shelves.iter().cloned().collect();
        sorted_shelves.sort();

        Ok(Board {
            walls,
            shelves,
            sorted_shelves,
            bounds,
        })
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.contains(&pos)
    }

    /// Walls and everything outside the bounds.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.is_wall(pos) || !self.bounds.contains(pos)
    }

    pub fn is_shelf(&self, pos: Pos) -> bool {
        self.shelves.contains(&pos)
    }

    pub fn walls(&self) -> &FnvHashSet<Pos> {
        &self.walls
    }

    pub fn shelves(&self) -> &FnvHashSet<Pos> {
        &self.shelves
    }

    pub(crate) fn sorted_shelves(&self) -> &[Pos] {
        &self.sorted_shelves
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
