//! Generate error code documentation from the source of truth (error enums).
//!
//! Codes, descriptions and help text come straight from
//! [`CrosswordError::code`], [`CrosswordError::description`] and
//! [`CrosswordError::help`].
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;
use xword_dsl::errors::{ClueProblem, CrosswordError, JsonProblem, Relation};
use xword_dsl::Direction;

/// One example of every `CrosswordError` variant, in code order
fn all_error_variants() -> Vec<CrosswordError> {
    vec![
        CrosswordError::UnparseableLine { line: "pubdate: 31/01/2017".to_string() },
        CrosswordError::ClueWithoutGrouping { line: "[1,1] 1. Feline (CAT)".to_string() },
        CrosswordError::MissingField { field: "author" },
        CrosswordError::Clue {
            direction: Direction::Down,
            line: "- [1,1] 1. Dig (DIG)".to_string(),
            problem: ClueProblem::LetterClash { position: 1 },
        },
        CrosswordError::NoClues,
        CrosswordError::MissingId { id: 2 },
        CrosswordError::OutOfOrder { id: 6, previous: 5, relation: Relation::LeftOf },
        CrosswordError::Json(JsonProblem::MissingField("gridnums")),
        CrosswordError::InvalidPuzzle { count: 1 },
        CrosswordError::NotValidated,
    ]
}

/// Every clue-level problem reported under X004
fn all_clue_problems() -> Vec<ClueProblem> {
    vec![
        ClueProblem::NonPositiveId,
        ClueProblem::IdOutOfSequence,
        ClueProblem::ColumnOutOfBounds,
        ClueProblem::RowOutOfBounds,
        ClueProblem::SharedIdClash,
        ClueProblem::ZeroWordSize,
        ClueProblem::EmptyWord,
        ClueProblem::TooLong,
        ClueProblem::TooLongFromCoord,
        ClueProblem::LetterClash { position: 3 },
    ]
}

// writing to a String cannot fail, so results of writeln! are ignored below
fn render_docs() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Errors\n");
    for error in all_error_variants() {
        let _ = writeln!(out, "### {}: {}\n", error.code(), error.description());
        if let Some(help_text) = error.help() {
            let _ = writeln!(out, "**How to fix:**\n```\n{help_text}\n```\n");
        }
        let _ = writeln!(out, "**Example error message:**\n```\n{error}\n```\n");
        let _ = writeln!(out, "**Detailed format:**\n```\n{}\n```\n", error.display_detailed());
        let _ = writeln!(out, "---\n");
    }

    let _ = writeln!(out, "## Clue Problems (X004)\n");
    let _ = writeln!(out, "| Problem | Hint |");
    let _ = writeln!(out, "|---|---|");
    for problem in all_clue_problems() {
        let _ = writeln!(out, "| {problem} | {} |", problem.help().unwrap_or(""));
    }

    let _ = writeln!(out, "\n## Error Display Formats\n");
    let _ = writeln!(out, "### Simple Format\n```\nError: <message>\nERROR: <message>\n```\n");
    let _ = writeln!(out, "### Detailed Format (via `display_detailed()`)\n```\n<message> (<code>)\n<help text if available>\n```");

    out
}

fn main() {
    print!("{}", render_docs());
}
