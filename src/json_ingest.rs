//! Rewrites the JSON interchange format as DSL text.
//!
//! Only the checks needed to write the DSL are made here. Grid geometry, id
//! sequencing and letter clashes are left to the DSL pipeline, which reads
//! the output in lenient mode.
//!
//! Missing top-level fields are all reported together; after that the first
//! structural problem stops the conversion.

use crate::answer::PLACEHOLDER;
use crate::errors::{CrosswordError, JsonProblem};
use crate::generate::escape_text;
use crate::puzzle::{Dimensions, Direction, MetaField, MAX_DIMENSION};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Simple fields and the DSL key each becomes.
const TEXT_FIELDS: [(&str, MetaField); 5] = [
    ("author", MetaField::Author),
    ("editor", MetaField::Editor),
    ("publisher", MetaField::Publisher),
    ("copyright", MetaField::Copyright),
    ("date", MetaField::PubDate),
];

const STRUCTURE_FIELDS: [&str; 4] = ["size", "grid", "gridnums", "clues"];

const MAX_WORD: usize = MAX_DIMENSION + 1;

/// Converts a JSON crossword document into equivalent DSL text.
pub fn json_to_dsl(text: &str) -> Result<String, Vec<CrosswordError>> {
    let json: Value =
        serde_json::from_str(text).map_err(|e| vec![CrosswordError::from(JsonProblem::Syntax(e.to_string()))])?;
    let empty = Map::new();
    let doc = json.as_object().unwrap_or(&empty);

    let missing: Vec<CrosswordError> = TEXT_FIELDS
        .iter()
        .map(|(key, _)| *key)
        .chain(STRUCTURE_FIELDS)
        .filter(|key| !doc.contains_key(*key))
        .map(|key| JsonProblem::MissingField(key).into())
        .collect();
    if !missing.is_empty() {
        log::debug!("JSON document is missing {} field(s)", missing.len());
        return Err(missing);
    }

    convert(&json).map_err(|problem| vec![problem.into()])
}

fn convert(doc: &Value) -> Result<String, JsonProblem> {
    let mut lines = Vec::new();

    for (key, field) in TEXT_FIELDS {
        let value = scalar_text(&doc[key]);
        // empty values fall back to the lenient defaults
        if !value.is_empty() {
            lines.push(format!("{field} {value}"));
        }
    }

    let (rows, cols) = size(&doc["size"]).ok_or(JsonProblem::BadSize)?;
    lines.push(format!("size {rows}x{cols}"));

    let coords = id_coordinates(&doc["gridnums"], rows, cols)?;
    let answers = answer_lists(doc.get("answers"))?;

    for direction in Direction::ALL {
        let clues = doc["clues"]
            .get(direction.as_str())
            .and_then(Value::as_array)
            .ok_or(JsonProblem::MissingClues(direction))?;
        let given = answers.as_ref().map(|a| a.of(direction));
        if let Some(given) = given {
            if given.len() != clues.len() {
                return Err(JsonProblem::AnswerCountMismatch(direction));
            }
        }

        lines.push(direction.to_string());
        for (index, entry) in clues.iter().enumerate() {
            let answer = given.map(|a| &a[index]);
            lines.push(clue_line(entry, answer, direction, index, &coords, Dimensions::new(rows, cols))?);
        }
    }

    Ok(lines.join("\n"))
}

/// Text safe for a single DSL line: newlines flattened, `#` escaped.
fn one_line(raw: &str) -> String {
    escape_text(raw.replace(['\r', '\n'], " ").trim())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => one_line(s),
        other => one_line(&other.to_string()),
    }
}

fn positive(value: &Value) -> Option<usize> {
    value.as_u64().filter(|n| *n > 0).and_then(|n| usize::try_from(n).ok())
}

fn size(value: &Value) -> Option<(usize, usize)> {
    Some((positive(value.get("rows")?)?, positive(value.get("cols")?)?))
}

/// Maps each non-zero id in `gridnums` to its 1-based `(col, row)`.
fn id_coordinates(gridnums: &Value, rows: usize, cols: usize) -> Result<HashMap<u64, (usize, usize)>, JsonProblem> {
    let grid_rows = gridnums.as_array().filter(|g| g.len() == rows).ok_or(JsonProblem::GridnumsRows)?;

    let mut coords = HashMap::new();
    for (r, row) in grid_rows.iter().enumerate() {
        let row_no = r + 1;
        let cells = row.as_array().filter(|c| c.len() == cols).ok_or(JsonProblem::GridnumsCols { row: row_no })?;
        for (c, cell) in cells.iter().enumerate() {
            let col_no = c + 1;
            let id = cell.as_u64().ok_or(JsonProblem::GridnumsCell { row: row_no, col: col_no })?;
            if id == 0 {
                continue;
            }
            if coords.insert(id, (col_no, row_no)).is_some() {
                return Err(JsonProblem::DuplicateId { row: row_no, col: col_no, id });
            }
        }
    }
    Ok(coords)
}

struct AnswerValues<'a> {
    across: &'a [Value],
    down: &'a [Value],
}

impl<'a> AnswerValues<'a> {
    fn of(&self, direction: Direction) -> &'a [Value] {
        match direction {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }
}

fn answer_lists(value: Option<&Value>) -> Result<Option<AnswerValues<'_>>, JsonProblem> {
    let Some(answers) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let list = move |direction: Direction| {
        answers
            .get(direction.as_str())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or(JsonProblem::MissingAnswers(direction))
    };
    Ok(Some(AnswerValues { across: list(Direction::Across)?, down: list(Direction::Down)? }))
}

/// Integer entries of a word-size list; anything else is skipped. Sizes too
/// big for any grid are clamped, validation rejects them later.
fn word_sizes(value: &Value) -> Option<Vec<usize>> {
    let sizes = value.as_array()?;
    Some(
        sizes
            .iter()
            .filter_map(|s| match s.as_u64() {
                Some(n) => Some(usize::try_from(n).unwrap_or(MAX_WORD)),
                None => s.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as usize),
            })
            .map(|n| n.min(MAX_WORD))
            .collect(),
    )
}

/// Cuts `sizes` so their total is at most `limit`. Trailing sizes past the
/// limit are dropped; the one that crosses it is shortened.
fn fit_within(sizes: Vec<usize>, limit: usize) -> Vec<usize> {
    let mut left = limit;
    let mut fitted = Vec::new();
    for n in sizes {
        let take = n.min(left);
        if take == 0 && n > 0 {
            break;
        }
        fitted.push(take);
        left -= take;
        if take < n {
            break;
        }
    }
    fitted
}

fn clue_line(
    entry: &Value,
    answer: Option<&Value>,
    direction: Direction,
    index: usize,
    coords: &HashMap<u64, (usize, usize)>,
    dimensions: Dimensions,
) -> Result<String, JsonProblem> {
    let malformed = || JsonProblem::MalformedClue { direction, index };
    let parts = entry.as_array().filter(|p| p.len() >= 3).ok_or_else(malformed)?;
    let id = parts[0].as_u64().ok_or_else(malformed)?;
    let body = parts[1].as_str().ok_or_else(malformed)?;
    let sizes = word_sizes(&parts[2]).ok_or_else(malformed)?;

    let (col, row) = coords.get(&id).copied().ok_or(JsonProblem::UnknownClueId { id, direction })?;

    let given: Option<Vec<char>> = match answer {
        Some(value) => {
            let text = value.as_str().ok_or(JsonProblem::MalformedAnswer { direction, index })?;
            let letters: Vec<char> = text.to_uppercase().chars().collect();
            let expected: usize = sizes.iter().sum();
            if letters.len() != expected {
                return Err(JsonProblem::AnswerLengthMismatch { id, direction, expected });
            }
            Some(letters)
        }
        None => None,
    };

    // one letter past the grid edge is enough for validation to call it too long
    let sizes = fit_within(sizes, dimensions.extent(direction) + 1);
    let total: usize = sizes.iter().sum();
    let letters = given.unwrap_or_else(|| std::iter::repeat(PLACEHOLDER).take(total).collect());

    let mut rest = letters.as_slice();
    let words: Vec<String> = sizes
        .iter()
        .map(|&n| {
            let (word, tail) = rest.split_at(n.min(rest.len()));
            rest = tail;
            word.iter().collect()
        })
        .collect();

    Ok(format!("[{col},{row}] {id}. {} ({})", one_line(body), words.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "author": "A. Setter",
            "editor": "An Editor",
            "publisher": "A Paper",
            "copyright": "2024, A Paper",
            "date": "2024/03/01",
            "size": {"rows": 5, "cols": 5},
            "grid": [],
            "gridnums": [
                [1, 2, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 3, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0]
            ],
            "clues": {
                "across": [[1, "Cat", [3]], [3, "Pair of words", [2, 2]]],
                "down": [[1, "Cut", [3]], [2, "Spa", [3]]]
            },
            "answers": {"across": ["CAT", "abcd"], "down": ["CUT", "APA"]}
        })
    }

    fn convert_doc(doc: &Value) -> Result<String, Vec<String>> {
        json_to_dsl(&doc.to_string()).map_err(|errs| errs.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_converts_to_dsl() {
        let dsl = convert_doc(&document()).unwrap();
        let lines: Vec<&str> = dsl.lines().collect();
        assert_eq!(
            lines,
            vec![
                "author A. Setter",
                "editor An Editor",
                "publisher A Paper",
                "copyright 2024, A Paper",
                "pubdate 2024/03/01",
                "size 5x5",
                "across",
                "[1,1] 1. Cat (CAT)",
                "[2,3] 3. Pair of words (AB,CD)",
                "down",
                "[1,1] 1. Cut (CUT)",
                "[2,1] 2. Spa (APA)",
            ]
        );
    }

    #[test]
    fn test_without_answers_uses_placeholders() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("answers");
        let dsl = convert_doc(&doc).unwrap();
        assert!(dsl.contains("[2,3] 3. Pair of words (XX,XX)"));
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let errors = convert_doc(&json!({"author": "A", "size": {"rows": 5, "cols": 5}})).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "ERROR: missing field: editor (assuming this is a JSON doc)",
                "ERROR: missing field: publisher (assuming this is a JSON doc)",
                "ERROR: missing field: copyright (assuming this is a JSON doc)",
                "ERROR: missing field: date (assuming this is a JSON doc)",
                "ERROR: missing field: grid (assuming this is a JSON doc)",
                "ERROR: missing field: gridnums (assuming this is a JSON doc)",
                "ERROR: missing field: clues (assuming this is a JSON doc)",
            ]
        );
    }

    #[test]
    fn test_syntax_error() {
        let errors = json_to_dsl("{ not json").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("ERROR: "));
        assert!(errors[0].to_string().ends_with("(assuming this is a JSON doc)"));
    }

    #[test]
    fn test_empty_metadata_is_left_out() {
        let mut doc = document();
        doc["editor"] = json!("");
        let dsl = convert_doc(&doc).unwrap();
        assert!(!dsl.contains("editor"));
    }

    #[test]
    fn test_text_is_flattened_and_escaped() {
        let mut doc = document();
        doc["clues"]["across"][0] = json!([1, "Number #1\ncat", [3]]);
        let dsl = convert_doc(&doc).unwrap();
        assert!(dsl.contains(r"[1,1] 1. Number \#1 cat (CAT)"));
    }

    #[test]
    fn test_non_integer_sizes_are_ignored() {
        let mut doc = document();
        doc["clues"]["across"][1] = json!([3, "Pair", [2, ",", 2]]);
        let dsl = convert_doc(&doc).unwrap();
        assert!(dsl.contains("[2,3] 3. Pair (AB,CD)"));
    }

    #[test]
    fn test_structural_problems() {
        let cases: Vec<(Value, &str)> = vec![
            (json!({"rows": 0, "cols": 5}), "ERROR: could not parse size rows and cols (assuming this is a JSON doc)"),
            (json!({"rows": 4, "cols": 5}), "ERROR: gridnums does not match size.rows (assuming this is a JSON doc)"),
            (json!({"rows": 5, "cols": 4}), "ERROR: gridnums row 1 does not match size.cols (assuming this is a JSON doc)"),
        ];
        for (size, expected) in cases {
            let mut doc = document();
            doc["size"] = size;
            assert_eq!(convert_doc(&doc).unwrap_err(), vec![expected]);
        }
    }

    #[test]
    fn test_duplicate_gridnum() {
        let mut doc = document();
        doc["gridnums"][4][4] = json!(2);
        assert_eq!(
            convert_doc(&doc).unwrap_err(),
            vec!["ERROR: duplicate id in gridnums: [5,5] 2 (assuming this is a JSON doc)"]
        );
    }

    #[test]
    fn test_answer_problems() {
        let mut doc = document();
        doc["answers"]["down"] = json!(["CUT"]);
        assert_eq!(
            convert_doc(&doc).unwrap_err(),
            vec!["ERROR: mismatch between answers and clues in grouping down (assuming this is a JSON doc)"]
        );

        let mut doc = document();
        doc["answers"].as_object_mut().unwrap().remove("down");
        assert_eq!(
            convert_doc(&doc).unwrap_err(),
            vec!["ERROR: could not find answers.down (assuming this is a JSON doc)"]
        );

        let mut doc = document();
        doc["answers"]["across"][0] = json!("CATS");
        assert_eq!(
            convert_doc(&doc).unwrap_err(),
            vec!["ERROR: answer for clue 1 across does not have 3 letters (assuming this is a JSON doc)"]
        );
    }

    #[test]
    fn test_oversized_answers_stop_past_the_grid_edge() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("answers");
        doc["clues"]["across"][0] = json!([1, "Cat", vec![256; 4000]]);
        let dsl = convert_doc(&doc).unwrap();
        assert!(dsl.contains("[1,1] 1. Cat (XXXXXX)"));
        assert!(dsl.len() < 300, "dsl grew to {} bytes", dsl.len());

        let mut doc = document();
        doc["clues"]["down"][0] = json!([1, "Cut", [2, 2, 2]]);
        doc["answers"]["down"][0] = json!("CUTTER");
        assert!(convert_doc(&doc).unwrap().contains("[1,1] 1. Cut (CU,TT,ER)"));
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(vec![3, 0, 9, 4], 6), vec![3, 0, 3]);
        assert_eq!(fit_within(vec![2, 2], 6), vec![2, 2]);
        assert_eq!(fit_within(vec![6, 0, 1], 6), vec![6, 0]);
    }

    #[test]
    fn test_unknown_clue_id() {
        let mut doc = document();
        doc["clues"]["down"][1] = json!([9, "Nine", [3]]);
        assert_eq!(
            convert_doc(&doc).unwrap_err(),
            vec!["ERROR: no gridnums value for clue 9 down (assuming this is a JSON doc)"]
        );
    }
}
