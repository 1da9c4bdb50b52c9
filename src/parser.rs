use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::config::Format;
use crate::data::Pos;
use crate::level::Level;
use crate::map::{Board, BoardErr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    MultipleHeroes,
    NoHero,
    Board(BoardErr),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::MultipleHeroes => write!(f, "More than one hero"),
            ParserErr::NoHero => write!(f, "No hero"),
            ParserErr::Board(err) => write!(f, "Invalid board: {}", err),
        }
    }
}

impl Error for ParserErr {}

impl From<BoardErr> for ParserErr {
    fn from(err: BoardErr) -> Self {
        ParserErr::Board(err)
    }
}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_format(s, detect_format(s))
    }
}

/// Only the simple format uses `X`, `U` and `O`.
pub fn detect_format(level: &str) -> Format {
    if level.contains(|c: char| c == 'X' || c == 'U' || c == 'O') {
        Format::Simple
    } else {
        Format::Xsb
    }
}

#[derive(Default)]
struct Cells {
    walls: Vec<Pos>,
    shelves: Vec<Pos>,
    boxes: Vec<Pos>,
    hero: Option<Pos>,
}

impl Cells {
    fn set_hero(&mut self, pos: Pos) -> Result<(), ParserErr> {
        if self.hero.is_some() {
            return Err(ParserErr::MultipleHeroes);
        }
        self.hero = Some(pos);
        Ok(())
    }
}

pub fn parse_format(level: &str, format: Format) -> Result<Level, ParserErr> {
    let mut cells = Cells::default();

    // blank lines don't count as rows so levels can be written as raw strings more easily
    let lines = level.lines().map(str::trim_end).filter(|line| !line.is_empty());
    for (r, line) in lines.enumerate() {
        for (c, cur_char) in line.chars().enumerate() {
            match format {
                Format::Simple => parse_simple_cell(cur_char, r, c, &mut cells)?,
                Format::Xsb => parse_xsb_cell(cur_char, r, c, &mut cells)?,
            }
        }
    }

    let hero = cells.hero.ok_or(ParserErr::NoHero)?;
    let board = Board::new(cells.walls, cells.shelves)?;
    Level::new(board, hero, cells.boxes).map_err(ParserErr::Board)
}

fn parse_simple_cell(cur_char: char, r: usize, c: usize, cells: &mut Cells) -> Result<(), ParserErr> {
    let pos = Pos::new(c as i32, r as i32);
    match cur_char {
        '#' => cells.walls.push(pos),
        'X' => cells.set_hero(pos)?,
        'U' => cells.boxes.push(pos),
        '*' => cells.shelves.push(pos),
        'O' => {
            cells.boxes.push(pos);
            cells.shelves.push(pos);
        }
        ' ' => {}
        _ => return Err(ParserErr::Pos(r, c)),
    }
    Ok(())
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
fn parse_xsb_cell(cur_char: char, r: usize, c: usize, cells: &mut Cells) -> Result<(), ParserErr> {
    let pos = Pos::new(c as i32, r as i32);
    match cur_char {
        '#' => cells.walls.push(pos),
        'p' | '@' => cells.set_hero(pos)?,
        'P' | '+' => {
            cells.set_hero(pos)?;
            cells.shelves.push(pos);
        }
        'b' | '$' => cells.boxes.push(pos),
        'B' | '*' => {
            cells.boxes.push(pos);
            cells.shelves.push(pos);
        }
        '.' => cells.shelves.push(pos),
        ' ' | '-' | '_' => {}
        _ => return Err(ParserErr::Pos(r, c)),
    }
    Ok(())
}
