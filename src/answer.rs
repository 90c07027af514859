//! Answer specifications: the parenthesised part at the end of a clue line.
//!
//! An answer is written either as letters (`CAT,FLAP-JACK`) or as word sizes
//! (`3,4-4`), with `,` marking a word break and `-` a hyphen. Both forms are
//! normalised here into the same [`AnswerSpec`], which knows its numeric
//! rendering, its per-word lengths and the run of letters it puts in the grid.

use crate::errors::ClueProblem;
use crate::puzzle::MAX_DIMENSION;

/// Stands in for an unknown letter, both in source answers and in the grid.
pub const PLACEHOLDER: char = 'X';

/// Word-break and hyphen separators.
pub const SEPARATORS: [char; 2] = [',', '-'];

/// Word sizes are clamped here; anything this big is already too long for any grid.
const MAX_SEGMENT_LEN: usize = MAX_DIMENSION + 1;

fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// One word of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Known letters, e.g. `CAT`. May be empty when the source has `,,`.
    Letters(String),
    /// Only the size is known.
    Length(usize),
}

impl Segment {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Segment::Letters(s) => s.len(),
            Segment::Length(n) => *n,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A normalised answer specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSpec {
    /// Letters as written, or the numeric form when the letters were all placeholders.
    literal: String,
    /// Word sizes with the original separators, e.g. `3,4-4`.
    numeric: String,
    segments: Vec<Segment>,
}

impl AnswerSpec {
    /// Reads an answer spec, returning `None` unless it is made solely of
    /// `A-Z` and separators, or solely of `0-9` and separators.
    #[must_use]
    pub fn parse(raw: &str) -> Option<AnswerSpec> {
        if raw.is_empty() {
            return None;
        }

        let is_letters = raw.chars().all(|c| c.is_ascii_uppercase() || is_separator(c));
        let is_numbers = raw.chars().all(|c| c.is_ascii_digit() || is_separator(c));

        let numeric = if is_letters {
            letters_to_numeric(raw)
        } else if is_numbers {
            raw.to_string()
        } else {
            return None;
        };

        // all placeholders means the setter only knows the word sizes
        let literal = if is_letters && raw.chars().all(|c| c == PLACEHOLDER || is_separator(c)) {
            numeric.clone()
        } else {
            raw.to_string()
        };

        let segments = literal.split(SEPARATORS).map(to_segment).collect();

        Some(AnswerSpec { literal, numeric, segments })
    }

    /// The spec as it should be written back with answers included.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The spec with every word replaced by its size.
    #[must_use]
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Per-word lengths, in order.
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        self.segments.iter().map(Segment::len).collect()
    }

    /// Number of grid cells the answer covers.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.segments.iter().map(Segment::len).fold(0, usize::saturating_add)
    }

    /// The letters the answer puts in the grid, placeholders for unknown ones.
    #[must_use]
    pub fn words(&self) -> String {
        let mut words = String::with_capacity(self.total_len());
        for segment in &self.segments {
            match segment {
                Segment::Letters(s) => words.push_str(s),
                Segment::Length(n) => words.extend(std::iter::repeat(PLACEHOLDER).take(*n)),
            }
        }
        words
    }

    /// Rejects answers with a zero-size or empty word.
    pub fn check(&self) -> Result<(), ClueProblem> {
        for segment in &self.segments {
            match segment {
                Segment::Length(0) => return Err(ClueProblem::ZeroWordSize),
                Segment::Letters(s) if s.is_empty() => return Err(ClueProblem::EmptyWord),
                _ => {}
            }
        }
        Ok(())
    }
}

/// `ABC,DE-F` → `3,2-1`
fn letters_to_numeric(raw: &str) -> String {
    let mut out = String::new();
    let mut run = 0usize;
    for c in raw.chars() {
        if is_separator(c) {
            if run > 0 {
                out.push_str(&run.to_string());
                run = 0;
            }
            out.push(c);
        } else {
            run += 1;
        }
    }
    if run > 0 {
        out.push_str(&run.to_string());
    }
    out
}

fn to_segment(piece: &str) -> Segment {
    if !piece.is_empty() && piece.chars().all(|c| c.is_ascii_digit()) {
        let n = piece.parse::<usize>().map_or(MAX_SEGMENT_LEN, |n| n.min(MAX_SEGMENT_LEN));
        Segment::Length(n)
    } else {
        Segment::Letters(piece.to_string())
    }
}
