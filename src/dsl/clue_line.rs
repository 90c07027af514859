//! Grammar for a single clue line.
//!
//! ```text
//! clue line   = [list marker] coordinates ws id "." ws body ws "(" answer ")"
//! list marker = "-" ws
//! coordinates = "[" number "," number "]"        (column first)
//! id          = number
//! body        = any text
//! answer      = letters-and-separators | digits-and-separators
//! ```
//!
//! The answer is always the last parenthesised group, so bodies may contain
//! their own parentheses: `[1,1] 1. Cat (informal) (MOGGY)`.

use crate::answer::AnswerSpec;
use crate::puzzle::Coord;
use nom::{
    character::complete::{char, digit1, space1},
    combinator::{map, map_res, opt, value},
    sequence::{delimited, separated_pair, terminated},
    IResult, Parser,
};
use std::str::FromStr;

type PResult<'a, O> = IResult<&'a str, O>;

/// The pieces of a recognised clue line, borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueLine<'a> {
    pub coord: Coord,
    pub id: u32,
    pub body: &'a str,
    pub answer: AnswerSpec,
}

fn number<T: FromStr>(input: &str) -> PResult<'_, T> {
    map_res(digit1, |digits: &str| digits.parse::<T>()).parse(input)
}

fn list_marker(input: &str) -> PResult<'_, ()> {
    value((), (char('-'), space1)).parse(input)
}

fn coordinates(input: &str) -> PResult<'_, Coord> {
    map(
        delimited(char('['), separated_pair(number::<usize>, char(','), number::<usize>), char(']')),
        |(col, row)| Coord { col, row },
    )
    .parse(input)
}

fn clue_id(input: &str) -> PResult<'_, u32> {
    terminated(number::<u32>, char('.')).parse(input)
}

fn clue_head(input: &str) -> PResult<'_, (Coord, u32)> {
    map(
        (opt(list_marker), coordinates, space1, clue_id, space1),
        |(_, coord, _, id, _)| (coord, id),
    )
    .parse(input)
}

/// Splits `body (ANSWER)` at the last `(`; the body must be non-empty and
/// separated from the answer by whitespace.
fn body_and_answer(rest: &str) -> Option<(&str, AnswerSpec)> {
    let inner = rest.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let (body, raw_answer) = (&inner[..open], &inner[open + 1..]);

    if !body.ends_with(char::is_whitespace) {
        return None;
    }
    let body = body.trim_end();
    if body.is_empty() {
        return None;
    }

    Some((body, AnswerSpec::parse(raw_answer)?))
}

/// Recognises a trimmed, comment-free clue line.
#[must_use]
pub fn parse_clue_line(line: &str) -> Option<ClueLine<'_>> {
    let (rest, (coord, id)) = clue_head(line).ok()?;
    let (body, answer) = body_and_answer(rest)?;
    Some(ClueLine { coord, id, body, answer })
}
