#[macro_use]
extern crate clap;

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{App, Arg, ArgGroup};
use separator::Separatable;

use sokoban_tree_search::config::{Format, HeuristicKind, Method, SearchConfig};
use sokoban_tree_search::solver::tree::{NoReporter, Progress};
use sokoban_tree_search::{LoadLevel, Solve};

const PROGRESS_EVERY: u64 = 10_000;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-tree-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves sokoban levels using depth-first or best-first tree search")
        .arg(
            Arg::with_name("depth-first")
                .short("d")
                .long("depth-first")
                .help("Use depth-first search (default)"),
        )
        .arg(
            Arg::with_name("best-first")
                .short("b")
                .long("best-first")
                .help("Use best-first search ordered by moves + heuristic"),
        )
        .group(ArgGroup::with_name("method").args(&["depth-first", "best-first"]))
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&["combined", "box-shelf"])
                .default_value("combined")
                .help("Heuristic for best-first search"),
        )
        .arg(
            Arg::with_name("optimal")
                .short("o")
                .long("optimal")
                .help("Keep searching after the first solution and print the shortest one found"),
        )
        .arg(
            Arg::with_name("time-limit")
                .short("t")
                .long("time-limit")
                .takes_value(true)
                .value_name("SECONDS")
                .help("Stop searching after this many seconds"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Don't print progress while searching"),
        )
        .arg(
            Arg::with_name("no-replay")
                .short("n")
                .long("no-replay")
                .help("Don't print the states of the solution"),
        )
        .arg(
            Arg::with_name("simple")
                .short("s")
                .long("simple")
                .help("Parse as the simple format"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("x")
                .long("xsb")
                .help("Parse as XSB format (default is to autodetect)"),
        )
        .group(ArgGroup::with_name("format").args(&["simple", "xsb"]))
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap_or_default();
    let format = if matches.is_present("simple") {
        Some(Format::Simple)
    } else if matches.is_present("xsb") {
        Some(Format::Xsb)
    } else {
        None
    };

    let mut config = if matches.is_present("best-first") {
        // restricted by possible_values and defaulted
        let kind = value_t!(matches, "heuristic", HeuristicKind).unwrap_or_else(|err| err.exit());
        SearchConfig::best_first(kind)
    } else {
        SearchConfig::new(Method::DepthFirst)
    };
    config = config.seek_optimal(matches.is_present("optimal"));
    if let Some(secs) = matches.value_of("time-limit") {
        let secs: u64 = secs.parse().unwrap_or_else(|err| {
            println!("Invalid time limit {}: {}", secs, err);
            process::exit(1);
        });
        config = config.with_time_limit(Duration::from_secs(secs));
    }

    let level = match format {
        None => path.load_level(),
        Some(format) => path.load_level_as(format),
    }
    .unwrap_or_else(|err| {
        println!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    println!("Solving {}...", path);
    let mut last_report = 0;
    let mut print_progress = |progress: &Progress<'_, '_>| {
        if progress.visited < last_report + PROGRESS_EVERY {
            return;
        }
        last_report = progress.visited;
        let secs = progress.elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            (progress.visited as f64 / secs) as u64
        } else {
            0
        };
        print!(
            "\rNodes visited: {} | Nodes per second: {}",
            progress.visited.separated_string(),
            rate.separated_string()
        );
        io::stdout().flush().ok();
    };
    let result = if matches.is_present("quiet") {
        level.solve(config, &mut NoReporter)
    } else {
        level.solve(config, &mut print_progress)
    };
    if last_report > 0 {
        println!();
    }
    let solution = result.unwrap_or_else(|err| {
        println!("Failed to solve: {}", err);
        process::exit(1);
    });

    match solution.path_states {
        Some(ref states) => {
            println!("Found solution:");
            if !matches.is_present("no-replay") {
                for state in states {
                    println!("{}", level.xsb(state));
                }
            }
            if let Some(ref moves) = solution.moves {
                println!("{}", moves);
                println!("Moves: {}", moves.move_cnt());
                println!("Pushes: {}", moves.push_cnt());
            }
        }
        None => println!("No solution"),
    }
    println!("Search ended: {}", solution.termination);
    println!("Elapsed: {:.3} s", solution.stats.elapsed().as_secs_f64());
    print!("{}", solution.stats);
}
