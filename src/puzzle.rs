//! The puzzle model shared by every stage: metadata, dimensions, clues and the
//! aggregate [`Puzzle`] that carries the grid and the error list.

use crate::answer::AnswerSpec;
use crate::errors::{CrosswordError, ParseOptionsError};
use crate::grid::Grid;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Largest accepted grid side.
pub const MAX_DIMENSION: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Validation and generation order.
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    /// Case-insensitive match on `across` / `down`.
    pub(crate) fn from_keyword(s: &str) -> Option<Self> {
        Direction::ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Front-matter fields other than the grid size.
///
/// Variant order is the order fields are written back out by the DSL generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaField {
    Version,
    Name,
    Author,
    Editor,
    Copyright,
    Publisher,
    PubDate,
}

impl MetaField {
    pub const ALL: [MetaField; 7] = [
        MetaField::Version,
        MetaField::Name,
        MetaField::Author,
        MetaField::Editor,
        MetaField::Copyright,
        MetaField::Publisher,
        MetaField::PubDate,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MetaField::Version => "version",
            MetaField::Name => "name",
            MetaField::Author => "author",
            MetaField::Editor => "editor",
            MetaField::Copyright => "copyright",
            MetaField::Publisher => "publisher",
            MetaField::PubDate => "pubdate",
        }
    }

    /// Value used in lenient mode when the field is absent.
    #[must_use]
    pub fn default_value(self) -> &'static str {
        match self {
            MetaField::Version => "standard v1",
            MetaField::Name | MetaField::Author => "",
            MetaField::Editor => "Colin Inman",
            MetaField::Copyright => "2017, Financial Times",
            MetaField::Publisher => "Financial Times",
            MetaField::PubDate => "today",
        }
    }

    /// Whether strict mode reports the field as missing.
    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, MetaField::Version | MetaField::Name)
    }

    pub(crate) fn from_key(s: &str) -> Option<Self> {
        MetaField::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Front-matter values actually present in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: BTreeMap<MetaField, String>,
}

impl Metadata {
    /// Later occurrences of a field overwrite earlier ones.
    pub fn set(&mut self, field: MetaField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    #[must_use]
    pub fn get(&self, field: MetaField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// The stored value, or the field's lenient default.
    #[must_use]
    pub fn resolved(&self, field: MetaField) -> &str {
        self.get(field).unwrap_or_else(|| field.default_value())
    }

    /// Present fields, in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (MetaField, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// Grid size, rows first (`"15x17"` is 15 rows of 17 columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    /// Used when a lenient source gives no size.
    pub const DEFAULT: Dimensions = Dimensions { rows: 17, cols: 17 };

    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Dimensions { rows, cols }
    }

    #[must_use]
    pub const fn square(side: usize) -> Self {
        Dimensions { rows: side, cols: side }
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of cells available to an answer running in `direction`.
    #[must_use]
    pub fn extent(&self, direction: Direction) -> usize {
        match direction {
            Direction::Across => self.cols,
            Direction::Down => self.rows,
        }
    }

    /// Distance between consecutive cells of an answer in the flat grid.
    #[must_use]
    pub fn step(&self, direction: Direction) -> usize {
        match direction {
            Direction::Across => 1,
            Direction::Down => self.cols,
        }
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        (1..=self.cols).contains(&coord.col) && (1..=self.rows).contains(&coord.row)
    }

    /// Reading-order key: larger means further right/down.
    #[must_use]
    pub fn linear(&self, coord: Coord) -> usize {
        coord.col + coord.row * self.cols
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for Dimensions {
    type Err = ParseOptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseOptionsError::InvalidDimensions { input: s.to_string() };
        let (rows, cols) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let rows: usize = rows.parse().map_err(|_| invalid())?;
        let cols: usize = cols.parse().map_err(|_| invalid())?;

        let in_range = 1..=MAX_DIMENSION;
        if !in_range.contains(&rows) || !in_range.contains(&cols) {
            return Err(ParseOptionsError::DimensionsOutOfRange { input: s.to_string(), max: MAX_DIMENSION });
        }

        Ok(Dimensions { rows, cols })
    }
}

/// 1-based cell position, column first as written in the DSL (`[col,row]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Coord { col, row }
    }

    /// Index into the flat grid. Only meaningful when `dimensions.contains(self)`.
    #[must_use]
    pub fn index(&self, dimensions: Dimensions) -> usize {
        (self.col - 1) + (self.row - 1) * dimensions.cols
    }

    /// Position along the clue's own direction (column for across, row for down).
    #[must_use]
    pub fn offset(&self, direction: Direction) -> usize {
        match direction {
            Direction::Across => self.col,
            Direction::Down => self.row,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{}]", self.col, self.row)
    }
}

/// One clue as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub direction: Direction,
    pub coord: Coord,
    pub id: u32,
    pub body: String,
    pub answer: AnswerSpec,
    /// The comment-stripped, trimmed source line, quoted in error messages.
    pub source: String,
}

impl Clue {
    /// `"body (numeric lengths)"`, as shown to solvers.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{} ({})", self.body, self.answer.numeric())
    }
}

/// A puzzle as read from one input, plus everything validation learned about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub metadata: Metadata,
    pub dimensions: Dimensions,
    pub grid: Grid,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
    pub errors: Vec<CrosswordError>,
    /// The text this puzzle was parsed from.
    pub source: String,
    /// Canonical start cell of each id, filled in by validation.
    pub(crate) ids: BTreeMap<u32, Coord>,
    pub(crate) validated: bool,
}

impl Puzzle {
    pub(crate) fn new(
        metadata: Metadata,
        dimensions: Dimensions,
        across: Vec<Clue>,
        down: Vec<Clue>,
        errors: Vec<CrosswordError>,
        source: &str,
    ) -> Self {
        Puzzle {
            metadata,
            dimensions,
            grid: Grid::new(dimensions),
            across,
            down,
            errors,
            source: source.to_string(),
            ids: BTreeMap::new(),
            validated: false,
        }
    }

    #[must_use]
    pub fn clues(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True once [`crate::validate::validate`] has laid out the grid.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Checks a puzzle is fit to be turned into a spec or DSL.
    pub(crate) fn ensure_renderable(&self) -> Result<(), CrosswordError> {
        if !self.is_valid() {
            return Err(CrosswordError::InvalidPuzzle { count: self.errors.len() });
        }
        if !self.validated {
            return Err(CrosswordError::NotValidated);
        }
        Ok(())
    }

    /// Error list rendered as the strings handed to callers.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Start cell of every id seen by validation, in id order.
    pub fn numbered_cells(&self) -> impl Iterator<Item = (u32, Coord)> + '_ {
        self.ids.iter().map(|(id, coord)| (*id, *coord))
    }

    #[must_use]
    pub fn max_id(&self) -> u32 {
        self.ids.keys().next_back().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_round_trip_text() {
        let d: Dimensions = "15x17".parse().unwrap();
        assert_eq!(d, Dimensions::new(15, 17));
        assert_eq!(d.to_string(), "15x17");
        assert_eq!("5X5".parse::<Dimensions>().unwrap(), Dimensions::square(5));
    }

    #[test]
    fn test_dimensions_rejects_garbage() {
        for bad in ["", "15", "x15", "15x", "axb", "15x15x15", "-1x5"] {
            assert!(bad.parse::<Dimensions>().is_err(), "should reject {bad:?}");
        }
        assert!(matches!(
            "0x5".parse::<Dimensions>(),
            Err(ParseOptionsError::DimensionsOutOfRange { .. })
        ));
        assert!(matches!(
            "300x300".parse::<Dimensions>(),
            Err(ParseOptionsError::DimensionsOutOfRange { .. })
        ));
    }

    #[test]
    fn test_extent_and_step_follow_direction() {
        let d = Dimensions::new(4, 9);
        assert_eq!(d.extent(Direction::Across), 9);
        assert_eq!(d.extent(Direction::Down), 4);
        assert_eq!(d.step(Direction::Across), 1);
        assert_eq!(d.step(Direction::Down), 9);
    }

    #[test]
    fn test_coord_index_and_bounds() {
        let d = Dimensions::new(3, 5);
        assert_eq!(Coord::new(1, 1).index(d), 0);
        assert_eq!(Coord::new(5, 1).index(d), 4);
        assert_eq!(Coord::new(1, 2).index(d), 5);
        assert_eq!(Coord::new(5, 3).index(d), 14);
        assert!(d.contains(Coord::new(5, 3)));
        assert!(!d.contains(Coord::new(6, 1)));
        assert!(!d.contains(Coord::new(1, 4)));
        assert!(!d.contains(Coord::new(0, 1)));
    }

    #[test]
    fn test_linear_is_reading_order() {
        let d = Dimensions::square(5);
        assert!(d.linear(Coord::new(2, 1)) > d.linear(Coord::new(1, 1)));
        assert!(d.linear(Coord::new(1, 2)) > d.linear(Coord::new(5, 1)));
    }

    #[test]
    fn test_direction_keywords() {
        assert_eq!(Direction::from_keyword("ACROSS"), Some(Direction::Across));
        assert_eq!(Direction::from_keyword("down"), Some(Direction::Down));
        assert_eq!(Direction::from_keyword("diagonal"), None);
    }

    #[test]
    fn test_metadata_defaults_and_overwrite() {
        let mut m = Metadata::default();
        assert_eq!(m.resolved(MetaField::Editor), "Colin Inman");
        assert_eq!(m.get(MetaField::Editor), None);
        m.set(MetaField::Editor, "First");
        m.set(MetaField::Editor, "Second");
        assert_eq!(m.resolved(MetaField::Editor), "Second");
        assert_eq!(MetaField::from_key("PubDate"), Some(MetaField::PubDate));
    }

    #[test]
    fn test_metadata_iterates_in_generation_order() {
        let mut m = Metadata::default();
        m.set(MetaField::PubDate, "2024/01/02");
        m.set(MetaField::Author, "A");
        m.set(MetaField::Version, "v");
        let keys: Vec<_> = m.iter().map(|(f, _)| f.key()).collect();
        assert_eq!(keys, vec!["version", "author", "pubdate"]);
    }
}
