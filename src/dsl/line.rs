//! Line classification.
//!
//! Each source line is reduced to exactly one [`LineKind`] by
//! [`classify_line`]. The checks run in a fixed order and the first match
//! wins:
//!
//! 1. blank
//! 2. `---` front-matter fence
//! 3. `version|name|author|editor|copyright|publisher[:] value`
//! 4. `pubdate[:] YYYY/MM/DD`
//! 5. `size|dimensions[:] RxC` (accepted sizes only)
//! 6. `across[:]` / `down[:]`
//! 7. clue line (see [`super::clue_line`])
//! 8. anything else
//!
//! A pubdate or size whose value is malformed or not accepted matches none of
//! the above and ends up [`LineKind::Unrecognized`].

use super::clue_line::{parse_clue_line, ClueLine};
use crate::options::ParseOptions;
use crate::puzzle::{Dimensions, Direction, MetaField};
use fancy_regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Matches plain text fields like `author: A. Setter`
static META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(version|name|author|editor|copyright|publisher):?\s+(.+)$").unwrap()
});

/// Matches `pubdate: 2017/01/31`
static PUBDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^pubdate:?\s+(\d{4}/\d{2}/\d{2})$").unwrap());

/// Matches `size: 15x15` or `dimensions 17x17`
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:size|dimensions):?\s+(\d+x\d+)$").unwrap());

/// Matches `across:` / `Down`
static DIRECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(across|down):?$").unwrap());

/// Forces compilation of every line pattern so a bad pattern fails at startup.
pub fn validate_internal_regexes() {
    let _ = &*META_RE;
    let _ = &*PUBDATE_RE;
    let _ = &*SIZE_RE;
    let _ = &*DIRECTION_RE;
    log::debug!("Internal regex patterns validated successfully");
}

/// What a single (comment-stripped, trimmed) line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Fence,
    Meta(MetaField, &'a str),
    Size(Dimensions),
    DirectionHeader(Direction),
    Clue(ClueLine<'a>),
    Unrecognized,
}

/// Drops everything from the first unescaped `#`; `\#` stands for a literal `#`.
#[must_use]
pub fn strip_comment(line: &str) -> Cow<'_, str> {
    if !line.contains('#') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                chars.next();
                out.push('#');
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn captures<'a>(re: &Regex, line: &'a str) -> Option<fancy_regex::Captures<'a>> {
    // a runtime regex failure (backtrack limit) just means "no match" here
    re.captures(line).ok().flatten()
}

fn group<'a>(caps: &fancy_regex::Captures<'a>, i: usize) -> Option<&'a str> {
    caps.get(i).map(|m| m.as_str())
}

fn meta_field(line: &str) -> Option<LineKind<'_>> {
    let caps = captures(&META_RE, line)?;
    let field = MetaField::from_key(group(&caps, 1)?)?;
    Some(LineKind::Meta(field, group(&caps, 2)?))
}

fn pubdate(line: &str) -> Option<LineKind<'_>> {
    let caps = captures(&PUBDATE_RE, line)?;
    Some(LineKind::Meta(MetaField::PubDate, group(&caps, 1)?))
}

fn size<'a>(line: &'a str, options: &ParseOptions) -> Option<LineKind<'a>> {
    let caps = captures(&SIZE_RE, line)?;
    let dimensions: Dimensions = group(&caps, 1)?.parse().ok()?;
    options.accepts(dimensions).then_some(LineKind::Size(dimensions))
}

fn direction_header(line: &str) -> Option<LineKind<'_>> {
    let caps = captures(&DIRECTION_RE, line)?;
    Direction::from_keyword(group(&caps, 1)?).map(LineKind::DirectionHeader)
}

/// Classifies a trimmed, comment-free line. First match wins (see module docs).
#[must_use]
pub fn classify_line<'a>(line: &'a str, options: &ParseOptions) -> LineKind<'a> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line == "---" {
        return LineKind::Fence;
    }

    meta_field(line)
        .or_else(|| pubdate(line))
        .or_else(|| size(line, options))
        .or_else(|| direction_header(line))
        .or_else(|| parse_clue_line(line).map(LineKind::Clue))
        .unwrap_or(LineKind::Unrecognized)
}
