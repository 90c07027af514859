//! Parse configuration: strictness and the whitelist of grid sizes.

use crate::puzzle::Dimensions;

/// How absent front-matter is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Every required field must be present; missing ones are errors. Used for hand-written DSL.
    #[default]
    Strict,
    /// Absent fields take their defaults. Used for DSL generated from JSON.
    Lenient,
}

/// Options shared by every stage of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// `size:` lines are only recognised for these dimensions.
    pub accepted_sizes: Vec<Dimensions>,
}

/// Square sides accepted by default.
const SQUARE_SIDES: std::ops::RangeInclusive<usize> = 3..=25;

/// Common non-square grids accepted by default.
const RECTANGLES: [Dimensions; 4] = [
    Dimensions::new(15, 16),
    Dimensions::new(16, 15),
    Dimensions::new(21, 23),
    Dimensions::new(23, 21),
];

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { mode: ParseMode::Strict, accepted_sizes: standard_sizes() }
    }
}

impl ParseOptions {
    /// Default whitelist, lenient about missing front matter.
    #[must_use]
    pub fn lenient() -> Self {
        ParseOptions { mode: ParseMode::Lenient, ..ParseOptions::default() }
    }

    /// Same whitelist, lenient mode.
    #[must_use]
    pub fn as_lenient(&self) -> Self {
        ParseOptions { mode: ParseMode::Lenient, accepted_sizes: self.accepted_sizes.clone() }
    }

    /// Replaces the size whitelist.
    #[must_use]
    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = Dimensions>) -> Self {
        self.accepted_sizes = sizes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn accepts(&self, dimensions: Dimensions) -> bool {
        self.accepted_sizes.contains(&dimensions)
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }
}

/// Squares from 3x3 to 25x25 plus a few common rectangles.
#[must_use]
pub fn standard_sizes() -> Vec<Dimensions> {
    SQUARE_SIDES.map(Dimensions::square).chain(RECTANGLES).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_with_standard_sizes() {
        let options = ParseOptions::default();
        assert!(options.is_strict());
        assert!(options.accepts(Dimensions::square(15)));
        assert!(options.accepts(Dimensions::square(17)));
        assert!(options.accepts(Dimensions::square(5)));
        assert!(options.accepts(Dimensions::new(15, 16)));
        assert!(!options.accepts(Dimensions::square(26)));
        assert!(!options.accepts(Dimensions::new(5, 7)));
    }

    #[test]
    fn test_with_sizes_replaces_whitelist() {
        let options = ParseOptions::default().with_sizes([Dimensions::new(5, 7)]);
        assert!(options.accepts(Dimensions::new(5, 7)));
        assert!(!options.accepts(Dimensions::square(15)));
    }

    #[test]
    fn test_as_lenient_keeps_sizes() {
        let options = ParseOptions::default().with_sizes([Dimensions::new(5, 7)]).as_lenient();
        assert_eq!(options.mode, ParseMode::Lenient);
        assert_eq!(options.accepted_sizes, vec![Dimensions::new(5, 7)]);
    }
}
