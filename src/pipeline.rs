//! End-to-end parsing: format detection, tokenizing, validation and the
//! outputs built from a valid puzzle.
//!
//! # Examples
//!
//! ```
//! use xword_dsl::{parse, ParseOptions};
//!
//! let text = "\
//! author: A. Setter
//! editor: An Editor
//! publisher: A Paper
//! copyright: 2024, A Paper
//! pubdate: 2024/03/01
//! size: 5x5
//! across:
//! - [1,1] 1. Feline (CAT)
//! ";
//! let crossword = parse(text, &ParseOptions::default()).unwrap();
//! assert_eq!(crossword.spec.gridnums[0][0], 1);
//!
//! let rejection = parse("across:\n- [1,1] 1. Feline", &ParseOptions::default()).unwrap_err();
//! assert!(rejection.errors[0].starts_with("ERROR: couldn't parse line"));
//! ```

use crate::dsl::parse_dsl;
use crate::generate::generate_dsl;
use crate::json_ingest::json_to_dsl;
use crate::options::ParseOptions;
use crate::puzzle::Puzzle;
use crate::spec::{generate_spec, CrosswordSpec};
use crate::validate::validate;
use log::{debug, info};
use serde::Serialize;

/// Which input syntax a text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Dsl,
    Json,
}

/// JSON documents start with `{`; everything else is read as DSL.
#[must_use]
pub fn detect_format(text: &str) -> SourceFormat {
    match text.trim_start().chars().next() {
        Some('{') => SourceFormat::Json,
        _ => SourceFormat::Dsl,
    }
}

/// A valid puzzle and everything derived from it.
#[derive(Debug, Clone)]
pub struct Crossword {
    pub format: SourceFormat,
    pub puzzle: Puzzle,
    pub spec: CrosswordSpec,
    pub dsl_with_answers: String,
    pub dsl_without_answers: String,
}

impl Crossword {
    pub fn spec_json(&self, with_answers: bool) -> Result<String, serde_json::Error> {
        if with_answers {
            self.spec.to_json()
        } else {
            self.spec.without_answers().to_json()
        }
    }

    #[must_use]
    pub fn grid_text(&self) -> String {
        self.puzzle.grid.to_text()
    }
}

/// Why a text was not accepted, plus the text itself so it can be shown back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", .errors.join("\n"))]
pub struct Rejection {
    pub errors: Vec<String>,
    pub text: String,
}

impl Rejection {
    fn new(errors: Vec<String>, text: &str) -> Self {
        Rejection { errors, text: text.to_string() }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Reads `text` as DSL or JSON and, if it describes a legal crossword,
/// builds the spec and regenerated DSL.
///
/// JSON input is converted to DSL and read leniently, keeping the accepted
/// sizes of `options`. Validation only runs on text that tokenized cleanly.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Crossword, Rejection> {
    let format = detect_format(text);
    debug!("reading input as {format:?}");

    let mut puzzle = match format {
        SourceFormat::Dsl => parse_dsl(text, options),
        SourceFormat::Json => {
            let dsl = json_to_dsl(text)
                .map_err(|errors| Rejection::new(errors.iter().map(ToString::to_string).collect(), text))?;
            parse_dsl(&dsl, &options.as_lenient())
        }
    };

    if puzzle.is_valid() {
        validate(&mut puzzle);
    }
    if !puzzle.is_valid() {
        info!("rejected puzzle with {} error(s)", puzzle.errors.len());
        return Err(Rejection::new(puzzle.error_messages(), text));
    }

    let built = generate_spec(&puzzle).and_then(|spec| {
        Ok((spec, generate_dsl(&puzzle, true)?, generate_dsl(&puzzle, false)?))
    });
    let (spec, dsl_with_answers, dsl_without_answers) =
        built.map_err(|e| Rejection::new(vec![e.to_string()], text))?;

    info!(
        "parsed {}x{} puzzle: {} across, {} down",
        puzzle.dimensions.rows,
        puzzle.dimensions.cols,
        puzzle.across.len(),
        puzzle.down.len()
    );

    Ok(Crossword { format, puzzle, spec, dsl_with_answers, dsl_without_answers })
}

/// The spec (with answers) as JSON, or `{"errors": [...], "text": ...}`.
pub fn parse_into_spec_json(text: &str, options: &ParseOptions) -> Result<String, serde_json::Error> {
    match parse(text, options) {
        Ok(crossword) => crossword.spec_json(true),
        Err(rejection) => rejection.to_json(),
    }
}
