//! The render-ready crossword spec handed to display code.
//!
//! ```json
//! {"name":"","author":"A","editor":"E","copyright":"C","publisher":"P","date":"2024/03/01",
//!  "size":{"rows":5,"cols":5},"grid":[["X","X","X",".","."],...],"gridnums":[[1,0,0,0,0],...],
//!  "clues":{"across":[[1,"Cat (3)",[3]]],"down":[[1,"Cut (3)",[3]]]},
//!  "answers":{"across":["CAT"],"down":["CUT"]},"notepad":"","id":""}
//! ```

use crate::answer::PLACEHOLDER;
use crate::errors::CrosswordError;
use crate::puzzle::{Clue, Coord, Direction, MetaField, Puzzle};
use serde::{Deserialize, Serialize};

/// Grid mask character for a cell some answer covers.
pub const FILLED: char = 'X';
/// Grid mask character for a cell no answer covers.
pub const EMPTY: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

/// `[id, "body (lengths)", [lengths]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry(pub u32, pub String, pub Vec<usize>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueLists {
    pub across: Vec<ClueEntry>,
    pub down: Vec<ClueEntry>,
}

/// Words-string of each clue, in the same order as [`ClueLists`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLists {
    pub across: Vec<String>,
    pub down: Vec<String>,
}

impl AnswerLists {
    /// True when no clue supplied a real letter.
    #[must_use]
    pub fn only_placeholders(&self) -> bool {
        self.across.iter().chain(&self.down).flat_map(|s| s.chars()).all(|c| c == PLACEHOLDER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordSpec {
    pub name: String,
    pub author: String,
    pub editor: String,
    pub copyright: String,
    pub publisher: String,
    pub date: String,
    pub size: GridSize,
    pub grid: Vec<Vec<char>>,
    pub gridnums: Vec<Vec<u32>>,
    pub clues: ClueLists,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<AnswerLists>,
    #[serde(default)]
    pub notepad: String,
    #[serde(default)]
    pub id: String,
}

impl CrosswordSpec {
    /// The same spec with `answers` dropped.
    #[must_use]
    pub fn without_answers(&self) -> CrosswordSpec {
        CrosswordSpec { answers: None, ..self.clone() }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn clue_entry(clue: &Clue) -> ClueEntry {
    ClueEntry(clue.id, clue.display_text(), clue.answer.lengths())
}

/// Builds the spec of a validated puzzle.
///
/// Fails with `InvalidPuzzle` if the puzzle has errors and `NotValidated` if
/// [`crate::validate::validate`] never ran on it.
///
/// `answers` is left out when every answer is made of placeholders only.
pub fn generate_spec(puzzle: &Puzzle) -> Result<CrosswordSpec, CrosswordError> {
    puzzle.ensure_renderable()?;

    let dims = puzzle.dimensions;
    let grid: Vec<Vec<char>> = puzzle
        .grid
        .rows()
        .map(|row| row.iter().map(|cell| if cell.is_some() { FILLED } else { EMPTY }).collect())
        .collect();

    let mut gridnums = vec![vec![0; dims.cols]; dims.rows];
    for (id, Coord { col, row }) in puzzle.numbered_cells() {
        gridnums[row - 1][col - 1] = id;
    }

    let list = |direction: Direction| -> Vec<ClueEntry> { puzzle.clues(direction).iter().map(clue_entry).collect() };
    let clues = ClueLists { across: list(Direction::Across), down: list(Direction::Down) };

    let words = |direction: Direction| -> Vec<String> {
        puzzle.clues(direction).iter().map(|c| c.answer.words()).collect()
    };
    let answers = AnswerLists { across: words(Direction::Across), down: words(Direction::Down) };

    let meta = |field: MetaField| puzzle.metadata.resolved(field).to_string();
    Ok(CrosswordSpec {
        name: meta(MetaField::Name),
        author: meta(MetaField::Author),
        editor: meta(MetaField::Editor),
        copyright: meta(MetaField::Copyright),
        publisher: meta(MetaField::Publisher),
        date: meta(MetaField::PubDate),
        size: GridSize { rows: dims.rows, cols: dims.cols },
        grid,
        gridnums,
        clues,
        answers: (!answers.only_placeholders()).then_some(answers),
        notepad: String::new(),
        id: meta(MetaField::Name),
    })
}
