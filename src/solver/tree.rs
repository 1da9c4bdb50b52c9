use std::fmt::{self, Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use fnv::FnvHashSet;
use typed_arena::Arena;

use crate::config::SearchConfig;
use crate::state::State;

use super::deadends::DeadEnds;
use super::frontier::Frontier;
use super::heuristics::Heuristic;
use super::node::Node;
use super::stats::Stats;
use super::SolverErr;

/// What the search reports once per iteration.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'p, 'b> {
    pub visited: u64,
    pub elapsed: Duration,
    pub state: &'p State<'b>,
}

pub trait Reporter {
    fn report(&mut self, progress: &Progress<'_, '_>);
}

/// For running headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReporter;

impl Reporter for NoReporter {
    fn report(&mut self, _progress: &Progress<'_, '_>) {}
}

impl<F> Reporter for F
where
    F: FnMut(&Progress<'_, '_>),
{
    fn report(&mut self, progress: &Progress<'_, '_>) {
        self(progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The first solution - only without seek optimal.
    Solved,
    /// No more nodes to visit.
    Exhausted,
    TimeLimit,
    Interrupted,
}

impl Display for Termination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Termination::Solved => write!(f, "solved"),
            Termination::Exhausted => write!(f, "search space exhausted"),
            Termination::TimeLimit => write!(f, "time limit reached"),
            Termination::Interrupted => write!(f, "interrupted"),
        }
    }
}

#[derive(Debug)]
pub struct SearchResult<'a, 'b> {
    /// The best goal node found, `None` if there is no solution (or none was found in time).
    pub solution: Option<&'a Node<'a, 'b>>,
    pub stats: Stats,
    pub termination: Termination,
}

/// The search engine - owns the open and closed lists for the duration of one `search`.
///
/// Nodes are allocated in the arena passed in by the caller so the result
/// (and every node on its path) stays valid as long as the arena does.
#[derive(Clone, Copy)]
pub struct Tree<'a, 'b> {
    arena: &'a Arena<Node<'a, 'b>>,
    dead_ends: &'a DeadEnds,
    config: SearchConfig,
    interrupt: Option<&'a AtomicBool>,
}

impl Debug for Tree<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("config", &self.config)
            .field("dead_ends", &self.dead_ends.len())
            .field("interrupt", &self.interrupt)
            .finish()
    }
}

impl<'a, 'b> Tree<'a, 'b> {
    pub fn new(arena: &'a Arena<Node<'a, 'b>>, dead_ends: &'a DeadEnds, config: SearchConfig) -> Self {
        Tree {
            arena,
            dead_ends,
            config,
            interrupt: None,
        }
    }

    /// The search stops between iterations once `flag` is set.
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn search(
        &self,
        initial_state: State<'b>,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult<'a, 'b>, SolverErr> {
        self.config.validate()?;
        let heuristic = self.config.active_heuristic();
        debug!(
            "Search called: {}, seek optimal: {}, time limit: {:?}",
            self.config.method, self.config.seek_optimal, self.config.time_limit
        );

        let started = Instant::now();
        let mut stats = Stats::new();
        let mut open = Frontier::new(self.config.method);
        let mut closed: FnvHashSet<&'a State<'b>> = FnvHashSet::default();
        let mut best: Option<&'a Node<'a, 'b>> = None;

        let h = evaluate(heuristic, &initial_state);
        let mut current: &'a Node<'a, 'b> = self.arena.alloc(Node::root(initial_state, h));
        stats.add_created(current);
        stats.add_visited(current);

        let termination = loop {
            reporter.report(&Progress {
                visited: stats.total_visited(),
                elapsed: started.elapsed(),
                state: &current.state,
            });

            if self.interrupted() {
                break Termination::Interrupted;
            }
            if let Some(limit) = self.config.time_limit {
                if started.elapsed() > limit {
                    break Termination::TimeLimit;
                }
            }

            if current.state.is_goal() {
                if best.map_or(true, |b| current.g < b.g) {
                    if self.config.seek_optimal {
                        info!("Found solution with {} moves", current.g);
                    }
                    best = Some(current);
                }
                if !self.config.seek_optimal {
                    break Termination::Solved;
                }
                // goals are never expanded, their children can't lead to a shorter solution
            } else if current.state.contains_deadend(self.dead_ends) {
                stats.add_dead_end(current);
            } else {
                for child_state in current.state.expand() {
                    if closed.contains(&child_state) {
                        stats.add_duplicate(current.g + 1);
                        continue;
                    }
                    let h = evaluate(heuristic, &child_state);
                    let child = self.arena.alloc(Node::child(current, child_state, h));
                    trace!("Queued {:?}", child);
                    stats.add_created(child);
                    open.insert(child);
                }
            }

            closed.insert(&current.state);
            match pop_unclosed(&mut open, &closed, &mut stats) {
                Some(next) => {
                    current = next;
                    stats.add_visited(current);
                }
                None => break Termination::Exhausted,
            }
        };

        stats.set_elapsed(started.elapsed());
        debug!("Search finished: {}", termination);
        if !open.is_empty() {
            debug!("{} nodes left in the open list", open.len());
        }

        Ok(SearchResult {
            solution: best,
            stats,
            termination,
        })
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

fn evaluate(heuristic: Option<Heuristic>, state: &State<'_>) -> Option<u32> {
    heuristic.map(|heuristic| heuristic(state))
}

/// The same state can be queued more than once before the first copy is visited.
fn pop_unclosed<'a, 'b>(
    open: &mut Frontier<'a, 'b>,
    closed: &FnvHashSet<&'a State<'b>>,
    stats: &mut Stats,
) -> Option<&'a Node<'a, 'b>> {
    while let Some(node) = open.pop() {
        if closed.contains(&node.state) {
            stats.add_duplicate(node.g);
            continue;
        }
        return Some(node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use crate::config::{HeuristicKind, Method};
    use crate::data::Pos;
    use crate::level::Level;

    fn zero(_: &State<'_>) -> u32 {
        0
    }

    fn run<'a, 'b>(
        arena: &'a Arena<Node<'a, 'b>>,
        dead_ends: &'a DeadEnds,
        level: &'b Level,
        config: SearchConfig,
    ) -> SearchResult<'a, 'b> {
        Tree::new(arena, dead_ends, config)
            .search(level.initial_state(), &mut NoReporter)
            .unwrap()
    }

    fn assert_valid_path(level: &Level, node: &Node<'_, '_>) {
        let path = node.path();
        assert_eq!(path.len(), node.g as usize + 1);
        assert_eq!(*path[0], level.initial_state());
        assert!(path[path.len() - 1].is_goal());
        for pair in path.windows(2) {
            let successors: Vec<_> = pair[0].expand().into_iter().filter(|s| s == pair[1]).collect();
            assert_eq!(successors.len(), 1);
        }
    }

    #[test]
    fn one_push() {
        let level: Level = r"
#####
#@$.#
#####
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());

        for &config in &[
            SearchConfig::depth_first(),
            SearchConfig::best_first(HeuristicKind::Combined),
            SearchConfig::best_first(HeuristicKind::BoxToShelf).seek_optimal(true),
        ] {
            let arena = Arena::new();
            let result = run(&arena, &dead_ends, &level, config);
            let solution = result.solution.unwrap();
            assert_eq!(solution.g, 1);
            assert_valid_path(&level, solution);
        }
    }

    #[test]
    fn already_solved() {
        let level: Level = r"
#####
#@ *#
#####
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());
        let arena = Arena::new();
        let result = run(&arena, &dead_ends, &level, SearchConfig::depth_first());
        assert_eq!(result.termination, Termination::Solved);
        assert_eq!(result.solution.unwrap().g, 0);
        assert_eq!(result.stats.total_visited(), 1);
    }

    #[test]
    fn box_starts_in_corner() {
        let level: Level = r"
######
#$   #
#  @.#
######
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());
        assert!(dead_ends.contains(Pos::new(1, 1)));

        let arena = Arena::new();
        let result = run(&arena, &dead_ends, &level, SearchConfig::depth_first());
        assert!(result.solution.is_none());
        assert_eq!(result.termination, Termination::Exhausted);
        // the initial state is discarded without expanding it
        assert_eq!(result.stats.total_created(), 1);
        assert_eq!(result.stats.total_dead_ends(), 1);
    }

    #[test]
    fn unsolvable_exhausts() {
        // neither box can ever move
        let level: Level = r"
#######
#@$$ .#
#    .#
#######
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());
        for &config in &[
            SearchConfig::depth_first(),
            SearchConfig::best_first(HeuristicKind::Combined),
        ] {
            let arena = Arena::new();
            let result = run(&arena, &dead_ends, &level, config);
            assert!(result.solution.is_none());
            assert_eq!(result.termination, Termination::Exhausted);
        }
    }

    #[test]
    fn never_expands_same_state_twice() {
        let level: Level = r"
########
#      #
# $ $  #
#   @  #
#.   . #
########
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());

        for &config in &[
            SearchConfig::depth_first(),
            SearchConfig::best_first(HeuristicKind::Combined),
            SearchConfig::best_first(HeuristicKind::BoxToShelf).seek_optimal(true),
        ] {
            let seen = RefCell::new(Vec::new());
            let mut reporter = |progress: &Progress<'_, '_>| {
                seen.borrow_mut()
                    .push((progress.state.hero(), progress.state.boxes().to_vec()));
            };
            let arena = Arena::new();
            let result = Tree::new(&arena, &dead_ends, config)
                .search(level.initial_state(), &mut reporter)
                .unwrap();

            let seen = seen.into_inner();
            let unique: FnvHashSet<_> = seen.iter().cloned().collect();
            assert_eq!(unique.len(), seen.len());
            assert_eq!(seen.len() as u64, result.stats.total_visited());
            assert_valid_path(&level, result.solution.unwrap());
        }
    }

    #[test]
    fn best_first_finds_shortest() {
        // right then push down, depth-first tries down first and walks around the box
        let level: Level = r"
#####
#@  #
# $ #
# . #
#####
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());

        let arena = Arena::new();
        let dfs = run(&arena, &dead_ends, &level, SearchConfig::depth_first());
        let dfs_solution = dfs.solution.unwrap();
        assert_eq!(dfs_solution.g, 8);
        assert_valid_path(&level, dfs_solution);

        let config = SearchConfig::new(Method::BestFirst).with_heuristic(zero);
        let arena = Arena::new();
        let shortest = run(&arena, &dead_ends, &level, config).solution.unwrap();
        assert_eq!(shortest.g, 2);
        assert_valid_path(&level, shortest);

        let config = SearchConfig::best_first(HeuristicKind::BoxToShelf);
        let arena = Arena::new();
        let result = run(&arena, &dead_ends, &level, config);
        assert_eq!(result.solution.unwrap().g, 2);
    }

    /// Expensive to stand below the box so the three move solution is found last.
    fn avoid_below_box(state: &State<'_>) -> u32 {
        if state.hero() == Pos::new(3, 4) {
            50
        } else {
            0
        }
    }

    const ROOM: &str = r"
#######
#     #
#  .  #
#  $@ #
#     #
#######
";

    #[test]
    fn seek_optimal_replaces_longer_solution() {
        let level: Level = ROOM.parse().unwrap();
        let dead_ends = DeadEnds::find(level.board());

        let config = SearchConfig::new(Method::BestFirst)
            .with_heuristic(avoid_below_box)
            .seek_optimal(true);
        let goals = RefCell::new(Vec::new());
        let mut reporter = |progress: &Progress<'_, '_>| {
            if progress.state.is_goal() {
                goals.borrow_mut().push(progress.state.hero());
            }
        };
        let arena = Arena::new();
        let result = Tree::new(&arena, &dead_ends, config)
            .search(level.initial_state(), &mut reporter)
            .unwrap();

        assert_eq!(result.termination, Termination::Exhausted);
        let solution = result.solution.unwrap();
        assert_eq!(solution.g, 3);
        assert_eq!(solution.state.hero(), Pos::new(3, 3));
        assert_valid_path(&level, solution);

        // a longer solution was recorded first
        let goals = goals.into_inner();
        assert!(goals.len() >= 2, "{:?}", goals);
        assert_ne!(goals[0], Pos::new(3, 3));
        assert_eq!(goals[goals.len() - 1], Pos::new(3, 3));

        // without seek optimal the first one wins
        let config = SearchConfig::new(Method::BestFirst).with_heuristic(avoid_below_box);
        let arena = Arena::new();
        let first = run(&arena, &dead_ends, &level, config).solution.unwrap();
        assert!(first.g > 3);
        assert_eq!(first.state.hero(), goals[0]);
    }

    #[test]
    fn seek_optimal_keeps_best() {
        let level: Level = r"
##########
#        #
# ###### #
#.  $@   #
# ###### #
#        #
##########
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());

        let config = SearchConfig::best_first(HeuristicKind::Combined).seek_optimal(true);
        let arena = Arena::new();
        let result = run(&arena, &dead_ends, &level, config);
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.solution.unwrap().g, 3);
    }

    #[test]
    fn missing_heuristic_fails_before_searching() {
        let level: Level = r"
#####
#@$.#
#####
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());
        let arena = Arena::new();

        let mut reports = 0;
        let mut reporter = |_: &Progress<'_, '_>| reports += 1;
        let err = Tree::new(&arena, &dead_ends, SearchConfig::new(Method::BestFirst))
            .search(level.initial_state(), &mut reporter)
            .unwrap_err();
        assert_eq!(err, SolverErr::MissingHeuristic);
        assert_eq!(reports, 0);
    }

    #[test]
    fn interrupt_stops_search() {
        let level: Level = r"
########
#      #
# $ $  #
#   @  #
#.   . #
########
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());
        let flag = AtomicBool::new(true);
        let arena = Arena::new();
        let result = Tree::new(&arena, &dead_ends, SearchConfig::depth_first())
            .with_interrupt(&flag)
            .search(level.initial_state(), &mut NoReporter)
            .unwrap();
        assert_eq!(result.termination, Termination::Interrupted);
        assert!(result.solution.is_none());
        assert_eq!(result.stats.total_visited(), 1);
    }

    #[test]
    fn time_limit_stops_search() {
        let level: Level = r"
########
#      #
# $ $  #
#   @  #
#.   . #
########
"
        .parse()
        .unwrap();
        let dead_ends = DeadEnds::find(level.board());
        let config = SearchConfig::best_first(HeuristicKind::Combined)
            .seek_optimal(true)
            .with_time_limit(Duration::from_secs(0));
        let arena = Arena::new();
        let mut reporter = |_: &Progress<'_, '_>| std::thread::sleep(Duration::from_millis(1));
        let result = Tree::new(&arena, &dead_ends, config)
            .search(level.initial_state(), &mut reporter)
            .unwrap();
        assert_eq!(result.termination, Termination::TimeLimit);
        assert!(result.solution.is_none());
    }

    fn seek_shortest_in_room() -> SearchConfig {
        SearchConfig::new(Method::BestFirst)
            .with_heuristic(zero)
            .seek_optimal(true)
    }

    #[test]
    fn time_limit_keeps_solution_found_so_far() {
        let level: Level = ROOM.parse().unwrap();
        let dead_ends = DeadEnds::find(level.board());
        let limit = Duration::from_millis(200);
        let config = seek_shortest_in_room().with_time_limit(limit);

        // stall only once the goal has been recorded
        let mut goal_seen = false;
        let mut reporter = |progress: &Progress<'_, '_>| {
            if goal_seen {
                std::thread::sleep(limit * 2);
            }
            goal_seen |= progress.state.is_goal();
        };
        let arena = Arena::new();
        let result = Tree::new(&arena, &dead_ends, config)
            .search(level.initial_state(), &mut reporter)
            .unwrap();
        assert_eq!(result.termination, Termination::TimeLimit);
        assert_eq!(result.solution.unwrap().g, 3);
    }

    #[test]
    fn interrupt_keeps_solution_found_so_far() {
        let level: Level = ROOM.parse().unwrap();
        let dead_ends = DeadEnds::find(level.board());
        let flag = AtomicBool::new(false);

        let mut goal_seen = false;
        let mut reporter = |progress: &Progress<'_, '_>| {
            if goal_seen {
                flag.store(true, Ordering::Relaxed);
            }
            goal_seen |= progress.state.is_goal();
        };
        let arena = Arena::new();
        let result = Tree::new(&arena, &dead_ends, seek_shortest_in_room())
            .with_interrupt(&flag)
            .search(level.initial_state(), &mut reporter)
            .unwrap();
        assert_eq!(result.termination, Termination::Interrupted);
        let solution = result.solution.unwrap();
        assert_eq!(solution.g, 3);
        assert_valid_path(&level, solution);
    }
}
