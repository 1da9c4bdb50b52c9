use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::{Board, Bounds};

/// Cells where a box can never be pushed to a shelf from.
///
/// Depends only on walls and shelves so it's computed once per board.
#[derive(Clone, PartialEq, Eq)]
pub struct DeadEnds {
    cells: FnvHashSet<Pos>,
    bounds: Bounds,
}

impl DeadEnds {
    pub fn find(board: &Board) -> DeadEnds {
        let cells: FnvHashSet<_> = board
            .bounds()
            .positions()
            .filter(|&pos| !board.is_wall(pos) && is_dead_end(board, pos))
            .collect();
        debug!("Found {} dead ends", cells.len());

        DeadEnds {
            cells,
            bounds: board.bounds(),
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().cloned()
    }
}

fn is_dead_end(board: &Board, pos: Pos) -> bool {
    if board.is_shelf(pos) {
        return false;
    }
    is_corner(board, pos)
        || DIRECTIONS
            .iter()
            .any(|&wall_dir| is_dead_corridor(board, pos, wall_dir))
}

fn is_corner(board: &Board, pos: Pos) -> bool {
    DIRECTIONS.iter().any(|&dir| {
        board.is_wall(pos + dir)
            && dir
                .perpendicular()
                .iter()
                .any(|&side| board.is_wall(pos + side))
    })
}

/// `wall_dir` points from `pos` to the wall it's next to.
///
/// A box there can only slide along the wall - if the wall has no gap between
/// the two walls capping the corridor and there's no shelf on the line, it's stuck.
fn is_dead_corridor(board: &Board, pos: Pos, wall_dir: Dir) -> bool {
    if !board.is_wall(pos + wall_dir) {
        return false;
    }

    // wall on the left or right means the box moves up and down its column
    let vertical = wall_dir.is_horizontal();
    let shelf_on_line = board.shelves().iter().any(|shelf| {
        if vertical {
            shelf.x == pos.x
        } else {
            shelf.y == pos.y
        }
    });
    if shelf_on_line {
        return false;
    }

    let [back, forth] = wall_dir.perpendicular();
    let (start, end) = match (scan_to_wall(board, pos, back), scan_to_wall(board, pos, forth)) {
        (Some(start), Some(end)) => (start, end),
        _ => return false,
    };

    let mut cur = start + forth;
    while cur != end {
        if !board.is_wall(cur + wall_dir) {
            return false;
        }
        cur = cur + forth;
    }
    true
}

fn scan_to_wall(board: &Board, from: Pos, dir: Dir) -> Option<Pos> {
    let bounds = board.bounds();
    let mut cur = from + dir;
    while bounds.contains(cur) {
        if board.is_wall(cur) {
            return Some(cur);
        }
        cur = cur + dir;
    }
    None
}

impl Display for DeadEnds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in self.bounds.min.y..=self.bounds.max.y {
            for x in self.bounds.min.x..=self.bounds.max.x {
                let cell = if self.contains(Pos::new(x, y)) { 1 } else { 0 };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for DeadEnds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
