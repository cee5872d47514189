//! Decision sources that answer "which do you prefer" questions.

use std::io::{BufRead, Write};

use tracing::warn;

/// Which side of a presented pair won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    First,
    Second,
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("oracle input closed before the ranking finished")]
    Closed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

/// Resolves one pairwise question at a time.
///
/// The preferred element ends up earlier in the final ranking.
pub trait Oracle<T> {
    fn prefer(&mut self, first: &T, second: &T) -> Result<Preference, OracleError>;
}

impl<T, F> Oracle<T> for F
where
    F: FnMut(&T, &T) -> Result<Preference, OracleError>,
{
    fn prefer(&mut self, first: &T, second: &T) -> Result<Preference, OracleError> {
        self(first, second)
    }
}

/// Prefers the smaller element under `Ord`, so rankings come out ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Oracle<T> for NaturalOrder {
    fn prefer(&mut self, first: &T, second: &T) -> Result<Preference, OracleError> {
        if first <= second {
            Ok(Preference::First)
        } else {
            Ok(Preference::Second)
        }
    }
}

/// Asks a person on a line-oriented terminal.
///
/// Prints both options numbered `1` and `2` and reads one answer per line.
/// Accepts `1`/`2` or `a`/`b`; anything else is asked again.
pub struct PromptOracle<R, W> {
    input: R,
    output: W,
    asked: usize,
}

impl<R: BufRead, W: Write> PromptOracle<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            asked: 0,
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<T, R, W> Oracle<T> for PromptOracle<R, W>
where
    T: std::fmt::Display,
    R: BufRead,
    W: Write,
{
    fn prefer(&mut self, first: &T, second: &T) -> Result<Preference, OracleError> {
        self.asked += 1;
        loop {
            writeln!(self.output, "Question {}: which do you prefer?", self.asked)?;
            writeln!(self.output, "  1) {first}")?;
            writeln!(self.output, "  2) {second}")?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(OracleError::Closed);
            }
            match parse_answer(&line) {
                Some(preference) => return Ok(preference),
                None => {
                    warn!(answer = line.trim(), "unrecognised answer, asking again");
                    writeln!(self.output, "Please answer 1 or 2.")?;
                }
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<Preference> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "a" => Some(Preference::First),
        "2" | "b" => Some(Preference::Second),
        _ => None,
    }
}
