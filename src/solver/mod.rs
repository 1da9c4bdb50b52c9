pub mod deadends;
pub mod heuristics;
pub mod node;
pub mod stats;
pub mod tree;

mod frontier;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use typed_arena::Arena;

use crate::config::{Method, SearchConfig};
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;
use crate::Solve;

use self::deadends::DeadEnds;
use self::stats::Stats;
use self::tree::{Reporter, Termination, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    MissingHeuristic,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::MissingHeuristic => {
                write!(f, "Missing heuristic - best-first search needs one")
            }
        }
    }
}

impl Error for SolverErr {}

/// Owned result of solving a level - the search tree is already gone.
pub struct SolverOk<'b> {
    /// Includes the initial state.
    pub path_states: Option<Vec<State<'b>>>,
    pub moves: Option<Moves>,
    pub stats: Stats,
    pub termination: Termination,
    pub(crate) method: Method,
}

impl<'b> SolverOk<'b> {
    fn new(
        path_states: Option<Vec<State<'b>>>,
        stats: Stats,
        termination: Termination,
        method: Method,
    ) -> Self {
        let moves = path_states.as_ref().map(|states| Moves::from_states(states));
        Self {
            path_states,
            moves,
            stats,
            termination,
            method,
        }
    }
}

impl Debug for SolverOk<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.path_states {
            None => writeln!(f, "No solution ({})", self.termination)?,
            Some(ref states) => writeln!(f, "{}: {}", self.method, states.len() - 1)?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(
        &self,
        config: SearchConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<SolverOk<'_>, SolverErr> {
        solve(self, config, reporter)
    }
}

fn solve<'b>(
    level: &'b Level,
    config: SearchConfig,
    reporter: &mut dyn Reporter,
) -> Result<SolverOk<'b>, SolverErr> {
    config.validate()?;

    debug!("Processing level...");
    let dead_ends = DeadEnds::find(level.board());
    debug!("Dead ends:\n{}", dead_ends);

    let arena = Arena::new();
    let tree = Tree::new(&arena, &dead_ends, config);
    let result = tree.search(level.initial_state(), reporter)?;

    let path_states = result
        .solution
        .map(|node| node.path().into_iter().cloned().collect::<Vec<_>>());
    if let Some(ref states) = path_states {
        debug!("Solved, path has {} states", states.len());
    }
    Ok(SolverOk::new(
        path_states,
        result.stats,
        result.termination,
        config.method,
    ))
}
