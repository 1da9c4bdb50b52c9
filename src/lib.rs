// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

#[macro_use]
extern crate log;

pub mod config;
pub mod data;
pub mod level;
pub mod map;
pub mod moves;
pub mod parser;
pub mod solver;
pub mod state;

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::{Format, SearchConfig};
use crate::level::Level;
use crate::solver::tree::Reporter;
use crate::solver::{SolverErr, SolverOk};

pub trait LoadLevel {
    /// Autodetects the format.
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;

    fn load_level_as(&self, format: Format) -> Result<Level, Box<dyn Error>>;
}

impl<P: AsRef<Path>> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level = fs::read_to_string(self)?.parse()?;
        Ok(level)
    }

    fn load_level_as(&self, format: Format) -> Result<Level, Box<dyn Error>> {
        let level = parser::parse_format(&fs::read_to_string(self)?, format)?;
        Ok(level)
    }
}

pub trait Solve {
    fn solve(
        &self,
        config: SearchConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<SolverOk<'_>, SolverErr>;
}
