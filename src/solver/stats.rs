use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use separator::Separatable;

use super::node::Node;

/// Counters by depth (number of moves from the initial state).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    dead_end_states: Vec<u64>,
    elapsed: Duration,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    /// Nodes that became the current node of the search.
    pub fn total_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn total_dead_ends(&self) -> u64 {
        self.dead_end_states.iter().sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    pub(crate) fn add_created(&mut self, node: &Node<'_, '_>) {
        Self::add(&mut self.created_states, node.g)
    }

    pub(crate) fn add_visited(&mut self, node: &Node<'_, '_>) {
        Self::add(&mut self.visited_states, node.g)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u32) {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn add_dead_end(&mut self, node: &Node<'_, '_>) {
        Self::add(&mut self.dead_end_states, node.g)
    }

    fn add(counts: &mut Vec<u64>, depth: u32) {
        let depth = depth as usize;
        // some depths might be skipped (duplicates)
        if depth >= counts.len() {
            counts.resize(depth + 1, 0);
        }
        counts[depth] += 1;
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "dead ends by depth: {:?}", self.dead_end_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total visited: {}", self.total_visited().separated_string())?;
        writeln!(f, "total reached duplicates: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "total dead ends: {}", self.total_dead_ends().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "Nodes visited total: {}", self.total_visited().separated_string())?;
        writeln!(f, "Reached duplicates total: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "Dead ends total: {}", self.total_dead_ends().separated_string())?;
        writeln!(f)?;

        writeln!(f, "Depth          Created        Visited        Duplicates     Dead ends")?;
        let depths = self
            .created_states
            .len()
            .max(self.duplicate_states.len());
        for i in 0..depths {
            let get = |counts: &Vec<u64>| counts.get(i).cloned().unwrap_or(0);
            writeln!(
                f,
                "{:<15}{:<15}{:<15}{:<15}{}",
                format!("{}:", i),
                get(&self.created_states).separated_string(),
                get(&self.visited_states).separated_string(),
                get(&self.duplicate_states).separated_string(),
                get(&self.dead_end_states).separated_string(),
            )?;
        }
        Ok(())
    }
}
