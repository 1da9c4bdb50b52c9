//! Estimates of the remaining number of moves - less is better.
//!
//! Both ignore walls and other boxes so they can overestimate
//! (e.g. when the hero has to walk around a wall to get behind a box).

use crate::state::State;

pub type Heuristic = fn(&State<'_>) -> u32;

/// Sum of the distances from each box to its closest shelf.
pub fn box_to_shelf_distance(state: &State<'_>) -> u32 {
    let shelves = state.board().shelves();

    let mut shelf_dist_sum = 0;
    for &box_pos in state.boxes() {
        let min = shelves
            .iter()
            .map(|&shelf| box_pos.dist(shelf))
            .min()
            .unwrap_or(0);
        shelf_dist_sum += min;
    }
    shelf_dist_sum
}

/// `box_to_shelf_distance` plus the distance from the hero to every box that isn't on a shelf yet.
pub fn combined_distance(state: &State<'_>) -> u32 {
    let board = state.board();
    let hero = state.hero();

    let hero_dist_sum: u32 = state
        .boxes()
        .iter()
        .filter(|&&box_pos| !board.is_shelf(box_pos))
        .map(|&box_pos| hero.dist(box_pos))
        .sum();

    box_to_shelf_distance(state) + hero_dist_sum
}
