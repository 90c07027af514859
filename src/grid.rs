//! Flat letter arena for the puzzle grid.

use crate::puzzle::{Coord, Dimensions};

/// Outcome of writing one letter into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The cell was unset.
    Written,
    /// The cell already held the same letter.
    Matched,
    /// The cell already held a different letter.
    Clash(char),
}

/// `rows × cols` cells addressed by `(col-1) + (row-1)*cols`.
///
/// `None` marks a cell no answer has reached yet; it never collides with a
/// letter, including the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Option<char>>,
}

impl Grid {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Grid { dimensions, cells: vec![None; dimensions.cell_count()] }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Letter at `coord`, `None` when unset or outside the grid.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<char> {
        if self.dimensions.contains(coord) {
            self.cells[coord.index(self.dimensions)]
        } else {
            None
        }
    }

    /// Callers keep `index` inside the grid; out-of-range writes are treated as a clash with nothing.
    pub(crate) fn place(&mut self, index: usize, letter: char) -> Placement {
        match self.cells.get_mut(index) {
            Some(cell @ None) => {
                *cell = Some(letter);
                Placement::Written
            }
            Some(Some(existing)) if *existing == letter => Placement::Matched,
            Some(Some(existing)) => Placement::Clash(*existing),
            None => Placement::Clash('\0'),
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<char>]> {
        self.cells.chunks(self.dimensions.cols.max(1))
    }

    /// Number of cells some answer has filled.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Plain-text picture of the grid with a column ruler and row numbers; unset cells show as `.`.
    ///
    /// ```text
    ///              1
    ///    1234567890123
    ///
    ///  1 CAT.........
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let cols = self.dimensions.cols;
        let mut tens = String::from("   ");
        let mut ones = String::from("   ");
        let mut spacer = String::from("   ");
        for x in 1..=cols {
            tens.push(ruler_tens(x));
            ones.push(digit(x % 10));
            spacer.push(' ');
        }

        let mut lines = vec![tens, ones, spacer];
        for (r, row) in self.rows().enumerate() {
            let y = r + 1;
            let mut line = String::with_capacity(cols + 3);
            line.push(ruler_tens(y));
            line.push(digit(y % 10));
            line.push(' ');
            line.extend(row.iter().map(|cell| cell.unwrap_or('.')));
            lines.push(line);
        }
        lines.join("\n")
    }
}

fn digit(n: usize) -> char {
    char::from_digit((n % 10) as u32, 10).unwrap_or(' ')
}

fn ruler_tens(n: usize) -> char {
    if n >= 10 {
        digit(n / 10)
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_reports_write_match_clash() {
        let mut grid = Grid::new(Dimensions::square(3));
        assert_eq!(grid.place(0, 'C'), Placement::Written);
        assert_eq!(grid.place(0, 'C'), Placement::Matched);
        assert_eq!(grid.place(0, 'D'), Placement::Clash('C'));
        assert_eq!(grid.get(Coord::new(1, 1)), Some('C'));
    }

    #[test]
    fn test_placeholder_is_not_the_unset_marker() {
        let mut grid = Grid::new(Dimensions::square(3));
        assert_eq!(grid.place(4, 'X'), Placement::Written);
        assert_eq!(grid.place(4, 'A'), Placement::Clash('X'));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_out_of_range_write_is_refused() {
        let mut grid = Grid::new(Dimensions::square(2));
        assert!(matches!(grid.place(4, 'A'), Placement::Clash(_)));
        assert_eq!(grid.get(Coord::new(3, 1)), None);
    }

    #[test]
    fn test_to_text_layout() {
        let mut grid = Grid::new(Dimensions::new(2, 3));
        grid.place(0, 'C');
        grid.place(1, 'A');
        grid.place(2, 'T');
        grid.place(3, 'U');
        let text = grid.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["      ", "   123", "      ", " 1 CAT", " 2 U.."]);
    }

    #[test]
    fn test_to_text_ruler_tens() {
        let grid = Grid::new(Dimensions::new(1, 12));
        let text = grid.to_text();
        let first = text.lines().next().unwrap();
        assert_eq!(first, format!("{}111", " ".repeat(12)));
    }
}
