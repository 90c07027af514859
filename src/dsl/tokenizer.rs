//! Reads DSL text into an unvalidated [`Puzzle`].
//!
//! Grouping state lives in [`parse_dsl`]'s own frame, so concurrent calls on
//! different inputs never see each other.

use super::line::{classify_line, strip_comment, LineKind};
use crate::errors::CrosswordError;
use crate::options::ParseOptions;
use crate::puzzle::{Clue, Dimensions, Direction, MetaField, Metadata, Puzzle};

/// Key reported when strict mode finds no size line.
const SIZE_FIELD: &str = "size";

/// Line-by-line read of DSL text.
///
/// Syntax errors are collected and reading continues, except for a clue line
/// with no `across:`/`down:` header before it, which stops reading at once.
/// In strict mode every required front-matter field that never appeared is
/// then reported, unless reading was stopped early.
#[must_use]
pub fn parse_dsl(text: &str, options: &ParseOptions) -> Puzzle {
    let mut metadata = Metadata::default();
    let mut dimensions: Option<Dimensions> = None;
    let mut grouping: Option<Direction> = None;
    let mut across = Vec::new();
    let mut down = Vec::new();
    let mut errors = Vec::new();
    let mut halted = false;

    for raw in text.split(['\r', '\n']) {
        let stripped = strip_comment(raw);
        let line = stripped.trim();

        match classify_line(line, options) {
            LineKind::Blank | LineKind::Fence => {}
            LineKind::Meta(field, value) => metadata.set(field, value),
            LineKind::Size(d) => dimensions = Some(d),
            LineKind::DirectionHeader(d) => grouping = Some(d),
            LineKind::Clue(parsed) => {
                let Some(direction) = grouping else {
                    log::debug!("clue before any grouping, stopping: {line}");
                    errors.push(CrosswordError::ClueWithoutGrouping { line: line.to_string() });
                    halted = true;
                    break;
                };
                let clue = Clue {
                    direction,
                    coord: parsed.coord,
                    id: parsed.id,
                    body: parsed.body.to_string(),
                    answer: parsed.answer,
                    source: line.to_string(),
                };
                match direction {
                    Direction::Across => across.push(clue),
                    Direction::Down => down.push(clue),
                }
            }
            LineKind::Unrecognized => {
                errors.push(CrosswordError::UnparseableLine { line: line.to_string() });
            }
        }
    }

    if options.is_strict() && !halted {
        errors.extend(
            MetaField::ALL
                .into_iter()
                .filter(|f| f.is_required() && metadata.get(*f).is_none())
                .map(|f| CrosswordError::MissingField { field: f.key() }),
        );
        if dimensions.is_none() {
            errors.push(CrosswordError::MissingField { field: SIZE_FIELD });
        }
    }

    log::debug!(
        "tokenized {} across, {} down, {} error(s)",
        across.len(),
        down.len(),
        errors.len()
    );

    Puzzle::new(metadata, dimensions.unwrap_or(Dimensions::DEFAULT), across, down, errors, text)
}
