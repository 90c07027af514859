//! Diagnostics produced while reading, validating and converting a crossword.
//!
//! Every message starts with `ERROR:` (the text could not be read) or `Error:`
//! (the text was read but does not describe a legal crossword), and clue-level
//! messages quote the offending source line verbatim so a user can find it.
//!
//! # Error Codes
//!
//! Each [`CrosswordError`] variant has a stable code for documentation lookup:
//!
//! - X001: `UnparseableLine` (Line matches no known pattern)
//! - X002: `ClueWithoutGrouping` (Clue line before any `across:`/`down:` header)
//! - X003: `MissingField` (Required front-matter field absent)
//! - X004: `Clue` (A clue breaks a structural rule (wraps [`ClueProblem`]))
//! - X005: `NoClues` (Puzzle has no clues at all)
//! - X006: `MissingId` (Gap in the clue id sequence)
//! - X007: `OutOfOrder` (Consecutive ids not in reading order)
//! - X008: `Json` (JSON interchange document rejected (wraps [`JsonProblem`]))
//! - X009: `InvalidPuzzle` (Generator asked to serialize an invalid puzzle)
//! - X010: `NotValidated` (Generator asked to serialize a puzzle that never went through validation)
//!
//! # Examples
//!
//! ```
//! use xword_dsl::errors::CrosswordError;
//!
//! let err = CrosswordError::MissingId { id: 2 };
//! assert_eq!(err.to_string(), "Error: missing clue with id=2");
//! assert_eq!(err.code(), "X006");
//! ```

use crate::puzzle::Direction;
use std::fmt;

/// One entry of a puzzle's error list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrosswordError {
    #[error("ERROR: couldn't parse line: {line}")]
    UnparseableLine { line: String },

    #[error("ERROR: clue specified but no 'across' or 'down' grouping specified: {line}")]
    ClueWithoutGrouping { line: String },

    #[error("ERROR: missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Error: {problem} in {direction} clue={line}")]
    Clue {
        direction: Direction,
        line: String,
        #[source]
        problem: ClueProblem,
    },

    #[error("Error: no clues specified")]
    NoClues,

    #[error("Error: missing clue with id={id}")]
    MissingId { id: u32 },

    #[error("Error: clue {id} starts {relation} clue {previous}")]
    OutOfOrder {
        id: u32,
        previous: u32,
        relation: Relation,
    },

    #[error("ERROR: {0} (assuming this is a JSON doc)")]
    Json(#[from] JsonProblem),

    #[error("ERROR: cannot generate output from a puzzle with {count} unresolved error(s)")]
    InvalidPuzzle { count: usize },

    #[error("ERROR: cannot generate output from a puzzle that has not been validated")]
    NotValidated,
}

/// Structural rule broken by a single clue during grid validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClueProblem {
    #[error("id must be positive")]
    NonPositiveId,

    #[error("id out of sequence")]
    IdOutOfSequence,

    #[error("x coord out of bounds")]
    ColumnOutOfBounds,

    #[error("y coord out of bounds")]
    RowOutOfBounds,

    #[error("shared id clashes with previous coordinates")]
    SharedIdClash,

    #[error("answer contains a word size of 0")]
    ZeroWordSize,

    #[error("answer contains an empty word")]
    EmptyWord,

    #[error("answer too long for crossword")]
    TooLong,

    #[error("answer too long for crossword from that coord")]
    TooLongFromCoord,

    #[error("letter {position} clashes with previous clues")]
    LetterClash { position: usize },
}

/// How a clue's start cell relates to the start cell of the clue numbered just before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Above,
    SameCoords,
    LeftOf,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Relation::Above => "above",
            Relation::SameCoords => "at same coords as",
            Relation::LeftOf => "to the left of",
        };
        write!(f, "{s}")
    }
}

/// Reasons the JSON ingest adapter refuses a document before any DSL is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonProblem {
    #[error("{0}")]
    Syntax(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("could not parse size rows and cols")]
    BadSize,

    #[error("gridnums does not match size.rows")]
    GridnumsRows,

    #[error("gridnums row {row} does not match size.cols")]
    GridnumsCols { row: usize },

    #[error("gridnums cell [{row},{col}] is not a non-negative integer")]
    GridnumsCell { row: usize, col: usize },

    #[error("duplicate id in gridnums: [{row},{col}] {id}")]
    DuplicateId { row: usize, col: usize, id: u64 },

    #[error("could not find answers.{0}")]
    MissingAnswers(Direction),

    #[error("could not find clues.{0}")]
    MissingClues(Direction),

    #[error("mismatch between answers and clues in grouping {0}")]
    AnswerCountMismatch(Direction),

    #[error("clue {index} in grouping {direction} is not of the form [id, text, [sizes]]")]
    MalformedClue { direction: Direction, index: usize },

    #[error("answer {index} in grouping {direction} is not a string")]
    MalformedAnswer { direction: Direction, index: usize },

    #[error("no gridnums value for clue {id} {direction}")]
    UnknownClueId { id: u64, direction: Direction },

    #[error("answer for clue {id} {direction} does not have {expected} letters")]
    AnswerLengthMismatch { id: u64, direction: Direction, expected: usize },
}

/// Problems with caller-supplied configuration (sizes on the command line, etc.).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseOptionsError {
    #[error("Invalid dimensions \"{input}\" (expected RxC, e.g. 15x15)")]
    InvalidDimensions { input: String },

    #[error("Dimensions \"{input}\" out of range (each side must be 1-{max})")]
    DimensionsOutOfRange { input: String, max: usize },
}

impl CrosswordError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CrosswordError::UnparseableLine { .. } => "X001",
            CrosswordError::ClueWithoutGrouping { .. } => "X002",
            CrosswordError::MissingField { .. } => "X003",
            CrosswordError::Clue { .. } => "X004",
            CrosswordError::NoClues => "X005",
            CrosswordError::MissingId { .. } => "X006",
            CrosswordError::OutOfOrder { .. } => "X007",
            CrosswordError::Json(_) => "X008",
            CrosswordError::InvalidPuzzle { .. } => "X009",
            CrosswordError::NotValidated => "X010",
        }
    }

    /// Short description of the error type
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CrosswordError::UnparseableLine { .. } => "Line matches no known pattern",
            CrosswordError::ClueWithoutGrouping { .. } => "Clue line before any 'across:'/'down:' header",
            CrosswordError::MissingField { .. } => "Required front-matter field absent",
            CrosswordError::Clue { .. } => "A clue breaks a structural rule",
            CrosswordError::NoClues => "Puzzle has no clues at all",
            CrosswordError::MissingId { .. } => "Gap in the clue id sequence",
            CrosswordError::OutOfOrder { .. } => "Consecutive ids not in reading order",
            CrosswordError::Json(_) => "JSON interchange document rejected",
            CrosswordError::InvalidPuzzle { .. } => "Generator asked to serialize an invalid puzzle",
            CrosswordError::NotValidated => "Generator asked to serialize an unvalidated puzzle",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            CrosswordError::UnparseableLine { .. } => Some(
                "Clue lines look like '- [1,1] 1. Feline (CAT)'. Dates must be YYYY/MM/DD and sizes must be one of the accepted RxC values",
            ),
            CrosswordError::ClueWithoutGrouping { .. } => {
                Some("Add an 'across:' or 'down:' line before the first clue")
            }
            CrosswordError::MissingField { .. } => {
                Some("Add the field to the front matter, e.g. 'author: A. Setter'")
            }
            CrosswordError::Clue { problem, .. } => problem.help(),
            CrosswordError::MissingId { .. } => {
                Some("Every number from 1 up to the highest clue number must start some clue")
            }
            CrosswordError::OutOfOrder { .. } => {
                Some("Clue numbers must increase left to right, then top to bottom")
            }
            CrosswordError::NotValidated => Some("Run validate() on the puzzle before generating a spec or DSL"),
            CrosswordError::NoClues | CrosswordError::Json(_) | CrosswordError::InvalidPuzzle { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

impl ClueProblem {
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ClueProblem::IdOutOfSequence => Some("Within each of across and down, list clues in increasing id order"),
            ClueProblem::SharedIdClash => {
                Some("An id used both across and down must start at the same [col,row]")
            }
            ClueProblem::ZeroWordSize | ClueProblem::EmptyWord => {
                Some("Each word in the answer needs at least one letter, e.g. (CAT,FLAP) or (3,4)")
            }
            ClueProblem::TooLongFromCoord => {
                Some("The answer runs off the edge of the grid from its starting [col,row]")
            }
            ClueProblem::LetterClash { .. } => {
                Some("Crossing answers must agree on the letter in the shared cell")
            }
            _ => None,
        }
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
