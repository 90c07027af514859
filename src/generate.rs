//! Writes a validated puzzle back out as DSL text.

use crate::errors::CrosswordError;
use crate::puzzle::{Clue, Direction, Puzzle};

const FENCE: &str = "---";

/// `#` starts a comment, so literal ones are written as `\#`.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('#', r"\#")
}

fn clue_line(clue: &Clue, with_answers: bool) -> String {
    let spec = if with_answers { clue.answer.literal() } else { clue.answer.numeric() };
    format!("- {} {}. {} ({spec})", clue.coord, clue.id, escape_text(&clue.body))
}

/// Renders `puzzle` as DSL: front matter for the fields the source gave,
/// `size:`, then each direction's clues with either the answer letters or
/// just the word sizes.
///
/// Reading the with-answers text back with the same options gives the same
/// puzzle.
pub fn generate_dsl(puzzle: &Puzzle, with_answers: bool) -> Result<String, CrosswordError> {
    puzzle.ensure_renderable()?;

    let mut lines = vec![FENCE.to_string()];
    lines.extend(puzzle.metadata.iter().map(|(field, value)| format!("{field}: {}", escape_text(value))));
    lines.push(format!("size: {}", puzzle.dimensions));

    for direction in Direction::ALL {
        lines.push(format!("{direction}:"));
        lines.extend(puzzle.clues(direction).iter().map(|clue| clue_line(clue, with_answers)));
    }

    let dims = puzzle.dimensions;
    lines.extend([
        "# ".to_string(),
        format!(
            "# [coordinates of clue in grid]: [across,down]. [1,1] = top left, [{},{}]=bottom right.",
            dims.cols, dims.rows
        ),
        "# (WORDS,IN,ANSWER): capitalised, and separated by commas or hyphens.".to_string(),
        FENCE.to_string(),
    ]);

    Ok(lines.join("\n"))
}
