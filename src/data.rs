use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [
            self + Dir::Left,
            self + Dir::Right,
            self + Dir::Up,
            self + Dir::Down,
        ]
    }

    /// Only valid for orthogonally adjacent positions
    pub(crate) fn dir_to(self, other: Pos) -> Option<Dir> {
        DIRECTIONS.iter().cloned().find(|&dir| self + dir == other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

/// Fixed order so expansion (and therefore search traces) is reproducible.
pub const DIRECTIONS: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

impl Dir {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
        }
    }

    /// The two directions at a right angle to this one.
    pub fn perpendicular(self) -> [Dir; 2] {
        match self {
            Dir::Left | Dir::Right => [Dir::Up, Dir::Down],
            Dir::Up | Dir::Down => [Dir::Left, Dir::Right],
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Dir::Left || self == Dir::Right
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Left => write!(f, "l"),
            Dir::Right => write!(f, "r"),
            Dir::Up => write!(f, "u"),
            Dir::Down => write!(f, "d"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dx, dy) = dir.offset();
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving() {
        let pos = Pos::new(3, 5);
        assert_eq!(pos + Dir::Left, Pos::new(2, 5));
        assert_eq!(pos + Dir::Right, Pos::new(4, 5));
        assert_eq!(pos + Dir::Up, Pos::new(3, 4));
        assert_eq!(pos + Dir::Down, Pos::new(3, 6));
        assert_eq!(pos + Dir::Up - Dir::Up, pos);
    }

    #[test]
    fn directions_between() {
        let pos = Pos::new(1, 1);
        for &dir in &DIRECTIONS {
            assert_eq!(pos.dir_to(pos + dir), Some(dir));
        }
        assert_eq!(pos.dir_to(pos), None);
        assert_eq!(pos.dir_to(Pos::new(3, 1)), None);
    }

    #[test]
    fn perpendicular() {
        for &dir in &DIRECTIONS {
            for &other in &dir.perpendicular() {
                assert_ne!(dir.is_horizontal(), other.is_horizontal());
            }
        }
    }

    #[test]
    fn distance() {
        assert_eq!(Pos::new(0, 0).dist(Pos::new(3, -4)), 7);
        assert_eq!(Pos::new(2, 2).dist(Pos::new(2, 2)), 0);
    }
}
