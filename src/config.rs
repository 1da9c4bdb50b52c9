use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::solver::heuristics::{self, Heuristic};
use crate::solver::SolverErr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `#` wall, `X` hero, `U` box, `*` shelf, `O` box on shelf
    Simple,
    Xsb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    DepthFirst,
    BestFirst,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::DepthFirst => write!(f, "depth-first"),
            Method::BestFirst => write!(f, "best-first"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    BoxToShelf,
    Combined,
}

impl HeuristicKind {
    pub fn heuristic(self) -> Heuristic {
        match self {
            HeuristicKind::BoxToShelf => heuristics::box_to_shelf_distance,
            HeuristicKind::Combined => heuristics::combined_distance,
        }
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::BoxToShelf => write!(f, "box-shelf"),
            HeuristicKind::Combined => write!(f, "combined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl Display for UnknownHeuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown heuristic: {}", self.0)
    }
}

impl Error for UnknownHeuristic {}

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box-shelf" => Ok(HeuristicKind::BoxToShelf),
            "combined" => Ok(HeuristicKind::Combined),
            _ => Err(UnknownHeuristic(s.to_owned())),
        }
    }
}

/// Everything `search` needs to know before it starts.
#[derive(Clone, Copy)]
pub struct SearchConfig {
    pub method: Method,
    /// Required for best-first, ignored by depth-first.
    pub heuristic: Option<Heuristic>,
    pub time_limit: Option<Duration>,
    /// Keep searching after the first solution and return the shortest one found.
    pub seek_optimal: bool,
}

impl SearchConfig {
    pub fn new(method: Method) -> Self {
        SearchConfig {
            method,
            heuristic: None,
            time_limit: None,
            seek_optimal: false,
        }
    }

    pub fn depth_first() -> Self {
        Self::new(Method::DepthFirst)
    }

    pub fn best_first(kind: HeuristicKind) -> Self {
        Self::new(Method::BestFirst).with_heuristic(kind.heuristic())
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn seek_optimal(mut self, seek_optimal: bool) -> Self {
        self.seek_optimal = seek_optimal;
        self
    }

    pub fn validate(&self) -> Result<(), SolverErr> {
        if self.method == Method::BestFirst && self.heuristic.is_none() {
            return Err(SolverErr::MissingHeuristic);
        }
        Ok(())
    }

    /// The heuristic the search should evaluate - `None` for depth-first.
    pub(crate) fn active_heuristic(&self) -> Option<Heuristic> {
        match self.method {
            Method::DepthFirst => None,
            Method::BestFirst => self.heuristic,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::depth_first()
    }
}

impl Debug for SearchConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("method", &self.method)
            .field("heuristic", &self.heuristic.is_some())
            .field("time_limit", &self.time_limit)
            .field("seek_optimal", &self.seek_optimal)
            .finish()
    }
}
