//! Grid validation and embellishment.
//!
//! [`validate`] lays every clue's answer into a fresh grid, registering the
//! canonical start cell of each id, and appends one error per offending clue.
//! When the clues are individually sound it then checks the id sequence as a
//! whole: first for gaps, then for reading order.

use crate::errors::{ClueProblem, CrosswordError, Relation};
use crate::grid::{Grid, Placement};
use crate::puzzle::{Clue, Coord, Dimensions, Direction, Puzzle};
use log::{debug, trace};
use std::collections::BTreeMap;

/// Validates `puzzle` in place, rebuilding its grid and id table from scratch.
///
/// Errors already on the puzzle are kept; the id-sequence passes only run if
/// the error list is still empty once every clue has been checked. A valid
/// puzzle comes out of a second run unchanged.
pub fn validate(puzzle: &mut Puzzle) {
    let dimensions = puzzle.dimensions;
    let mut grid = Grid::new(dimensions);
    let mut ids: BTreeMap<u32, Coord> = BTreeMap::new();
    let mut errors = Vec::new();

    if puzzle.across.is_empty() && puzzle.down.is_empty() {
        errors.push(CrosswordError::NoClues);
    }

    for direction in Direction::ALL {
        // id of the previous clue in this direction, advanced even past rejected clues
        let mut previous_id = 0;
        for clue in puzzle.clues(direction) {
            if let Err(problem) = check_clue(clue, previous_id, dimensions, &mut ids, &mut grid) {
                debug!("{direction} clue {} rejected: {problem}", clue.id);
                errors.push(CrosswordError::Clue {
                    direction,
                    line: clue.source.clone(),
                    problem,
                });
            }
            previous_id = clue.id;
        }
    }

    let clean = puzzle.errors.is_empty() && errors.is_empty();
    if clean {
        errors.extend(missing_ids(&ids));
    }
    if clean && errors.is_empty() {
        errors.extend(first_out_of_order(&ids, dimensions));
    }

    debug!(
        "validated {} id(s), {} filled cell(s), {} new error(s)",
        ids.len(),
        grid.filled_count(),
        errors.len()
    );

    puzzle.grid = grid;
    puzzle.ids = ids;
    puzzle.errors.extend(errors);
    puzzle.validated = true;
}

/// Runs the per-clue rules in order and stops at the first one broken.
fn check_clue(
    clue: &Clue,
    previous_id: u32,
    dimensions: Dimensions,
    ids: &mut BTreeMap<u32, Coord>,
    grid: &mut Grid,
) -> Result<(), ClueProblem> {
    let Clue { direction, coord, id, answer, .. } = clue;
    let (direction, coord, id) = (*direction, *coord, *id);

    if id == 0 {
        return Err(ClueProblem::NonPositiveId);
    }
    if id <= previous_id {
        return Err(ClueProblem::IdOutOfSequence);
    }

    if !(1..=dimensions.cols).contains(&coord.col) {
        return Err(ClueProblem::ColumnOutOfBounds);
    }
    if !(1..=dimensions.rows).contains(&coord.row) {
        return Err(ClueProblem::RowOutOfBounds);
    }

    match ids.get(&id) {
        Some(known) if *known != coord => return Err(ClueProblem::SharedIdClash),
        Some(_) => {}
        None => {
            ids.insert(id, coord);
        }
    }

    answer.check()?;
    let extent = dimensions.extent(direction);
    let length = answer.total_len();
    if length > extent {
        return Err(ClueProblem::TooLong);
    }
    if length + coord.offset(direction) - 1 > extent {
        return Err(ClueProblem::TooLongFromCoord);
    }

    let start = coord.index(dimensions);
    let step = dimensions.step(direction);
    for (i, letter) in answer.words().chars().enumerate() {
        match grid.place(start + i * step, letter) {
            Placement::Written | Placement::Matched => {}
            Placement::Clash(existing) => {
                trace!("cell {} holds {existing:?}, {direction} clue {id} wants {letter:?}", start + i * step);
                return Err(ClueProblem::LetterClash { position: i + 1 });
            }
        }
    }

    Ok(())
}

/// One error per id in `1..=max` that no clue starts.
fn missing_ids(ids: &BTreeMap<u32, Coord>) -> Vec<CrosswordError> {
    let max = ids.keys().next_back().copied().unwrap_or(0);
    (1..=max)
        .filter(|id| !ids.contains_key(id))
        .map(|id| CrosswordError::MissingId { id })
        .collect()
}

/// Where `current` starts relative to `previous`, if not strictly after it in reading order.
fn out_of_order(previous: Coord, current: Coord, dimensions: Dimensions) -> Option<Relation> {
    if dimensions.linear(current) > dimensions.linear(previous) {
        return None;
    }
    Some(if current.row < previous.row {
        Relation::Above
    } else if current == previous {
        Relation::SameCoords
    } else {
        Relation::LeftOf
    })
}

/// The first consecutive pair of ids not in reading order. Assumes no gaps.
fn first_out_of_order(ids: &BTreeMap<u32, Coord>, dimensions: Dimensions) -> Option<CrosswordError> {
    ids.iter().zip(ids.iter().skip(1)).find_map(|((&previous, &from), (&id, &to))| {
        out_of_order(from, to, dimensions).map(|relation| CrosswordError::OutOfOrder { id, previous, relation })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse_dsl;
    use crate::options::ParseOptions;

    const HEADER: &str = "\
author: A. Setter
editor: An Editor
publisher: A Paper
copyright: 2024, A Paper
pubdate: 2024/03/01
size: 5x5
";

    fn validated(clues: &str) -> Puzzle {
        let mut puzzle = parse_dsl(&format!("{HEADER}{clues}"), &ParseOptions::default());
        assert!(puzzle.errors.is_empty(), "tokenizer errors: {:?}", puzzle.errors);
        validate(&mut puzzle);
        puzzle
    }

    fn cell(puzzle: &Puzzle, col: usize, row: usize) -> Option<char> {
        puzzle.grid.get(Coord::new(col, row))
    }

    #[test]
    fn test_shared_start_letters_agree() {
        let puzzle = validated("across:\n- [1,1] 1. Cat (CAT)\ndown:\n- [1,1] 1. Cut (CUT)\n");
        assert!(puzzle.is_valid(), "{:?}", puzzle.errors);
        assert_eq!(cell(&puzzle, 1, 1), Some('C'));
        assert_eq!(cell(&puzzle, 2, 1), Some('A'));
        assert_eq!(cell(&puzzle, 3, 1), Some('T'));
        assert_eq!(cell(&puzzle, 1, 2), Some('U'));
        assert_eq!(cell(&puzzle, 1, 3), Some('T'));
        assert_eq!(cell(&puzzle, 2, 2), None);
        assert_eq!(puzzle.numbered_cells().collect::<Vec<_>>(), vec![(1, Coord::new(1, 1))]);
    }

    #[test]
    fn test_letter_clash_at_shared_origin() {
        let puzzle = validated("across:\n- [1,1] 1. Cat (CAT)\ndown:\n- [1,1] 1. Dig (DIG)\n");
        assert_eq!(
            puzzle.error_messages(),
            vec!["Error: letter 1 clashes with previous clues in down clue=- [1,1] 1. Dig (DIG)"]
        );
    }

    #[test]
    fn test_missing_id_reported() {
        let puzzle = validated("across:\n- [1,1] 1. Cat (CAT)\n- [1,3] 3. Dog (DOG)\n");
        assert_eq!(puzzle.error_messages(), vec!["Error: missing clue with id=2"]);
    }

    #[test]
    fn test_every_gap_is_reported() {
        let puzzle = validated("across:\n- [1,1] 1. Cat (CAT)\n- [1,4] 4. Dog (DOG)\n");
        assert_eq!(
            puzzle.error_messages(),
            vec!["Error: missing clue with id=2", "Error: missing clue with id=3"]
        );
    }

    #[test]
    fn test_left_of_previous_id() {
        let ids = BTreeMap::from([(5, Coord::new(3, 1)), (6, Coord::new(2, 1))]);
        let err = first_out_of_order(&ids, Dimensions::square(5)).unwrap();
        assert_eq!(err.to_string(), "Error: clue 6 starts to the left of clue 5");
    }

    #[test]
    fn test_out_of_order_relations() {
        let d = Dimensions::square(5);
        assert_eq!(out_of_order(Coord::new(1, 2), Coord::new(4, 1), d), Some(Relation::Above));
        assert_eq!(out_of_order(Coord::new(2, 2), Coord::new(2, 2), d), Some(Relation::SameCoords));
        assert_eq!(out_of_order(Coord::new(3, 2), Coord::new(1, 2), d), Some(Relation::LeftOf));
        assert_eq!(out_of_order(Coord::new(5, 1), Coord::new(1, 2), d), None);
    }

    #[test]
    fn test_only_first_ordering_violation_is_reported() {
        // 3 is also left of 2, but the pass stops at the first pair
        let puzzle = validated("across:\n- [3,3] 1. Aa (AAA)\n- [2,3] 2. Bb (B)\n- [1,3] 3. Cc (C)\n");
        assert_eq!(puzzle.error_messages(), vec!["Error: clue 2 starts to the left of clue 1"]);
    }

    #[test]
    fn test_ordering_skipped_when_ids_missing() {
        let puzzle = validated("across:\n- [3,1] 1. Aa (AAA)\n- [1,3] 3. Cc (CCC)\n- [1,2] 4. Dd (DD)\n");
        assert_eq!(puzzle.error_messages(), vec!["Error: missing clue with id=2"]);
    }

    #[test]
    fn test_id_rules() {
        let puzzle = validated("across:\n- [1,1] 0. Zero (CAT)\n- [1,2] 2. Two (DOG)\n- [1,3] 2. Again (EMU)\n");
        assert_eq!(
            puzzle.error_messages(),
            vec![
                "Error: id must be positive in across clue=- [1,1] 0. Zero (CAT)",
                "Error: id out of sequence in across clue=- [1,3] 2. Again (EMU)",
            ]
        );
    }

    #[test]
    fn test_previous_advances_past_rejected_clue() {
        // 3 is rejected for its length but 2 is still checked against 3
        let puzzle = validated("across:\n- [1,1] 3. Long (ABCDEF)\n- [1,2] 2. Two (DOG)\n");
        assert_eq!(
            puzzle.error_messages(),
            vec![
                "Error: answer too long for crossword in across clue=- [1,1] 3. Long (ABCDEF)",
                "Error: id out of sequence in across clue=- [1,2] 2. Two (DOG)",
            ]
        );
    }

    #[test]
    fn test_bounds_and_lengths() {
        let puzzle = validated(
            "across:\n- [6,1] 1. Wide (A)\n- [1,6] 2. Deep (B)\n- [4,1] 3. Off edge (CAT)\n- [1,2] 4. Zero (2,0)\n\
             - [1,3] 5. Empty (AB,,C)\n",
        );
        assert_eq!(
            puzzle.error_messages(),
            vec![
                "Error: x coord out of bounds in across clue=- [6,1] 1. Wide (A)",
                "Error: y coord out of bounds in across clue=- [1,6] 2. Deep (B)",
                "Error: answer too long for crossword from that coord in across clue=- [4,1] 3. Off edge (CAT)",
                "Error: answer contains a word size of 0 in across clue=- [1,2] 4. Zero (2,0)",
                "Error: answer contains an empty word in across clue=- [1,3] 5. Empty (AB,,C)",
            ]
        );
    }

    #[test]
    fn test_zero_coordinate_is_out_of_bounds() {
        let puzzle = validated("down:\n- [1,0] 1. Nowhere (CAT)\n");
        assert_eq!(
            puzzle.error_messages(),
            vec!["Error: y coord out of bounds in down clue=- [1,0] 1. Nowhere (CAT)"]
        );
    }

    #[test]
    fn test_shared_id_must_share_coordinates() {
        let puzzle = validated("across:\n- [1,1] 1. Cat (CAT)\ndown:\n- [2,1] 1. Arc (ARC)\n");
        assert_eq!(
            puzzle.error_messages(),
            vec!["Error: shared id clashes with previous coordinates in down clue=- [2,1] 1. Arc (ARC)"]
        );
    }

    #[test]
    fn test_rectangular_grid_uses_own_extents() {
        let text = HEADER.replace("size: 5x5", "size: 15x16");
        let mut puzzle = parse_dsl(
            &format!("{text}across:\n- [1,1] 1. Sixteen (ABCDEFGHIJKLMNOP)\ndown:\n- [16,1] 2. Fifteen (PBCDEFGHIJKLMNO)\n"),
            &ParseOptions::default(),
        );
        validate(&mut puzzle);
        assert!(puzzle.is_valid(), "{:?}", puzzle.errors);
        assert_eq!(puzzle.grid.get(Coord::new(16, 15)), Some('O'));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut puzzle = validated("across:\n- [1,1] 1. Cat (CAT)\ndown:\n- [1,1] 1. Cut (CUT)\n- [3,1] 2. Tap (TAP)\n");
        assert!(puzzle.is_valid(), "{:?}", puzzle.errors);
        let grid = puzzle.grid.clone();
        validate(&mut puzzle);
        assert!(puzzle.is_valid());
        assert_eq!(puzzle.grid, grid);
    }

    #[test]
    fn test_no_clues() {
        let puzzle = validated("across:\n");
        assert_eq!(puzzle.error_messages(), vec!["Error: no clues specified"]);
    }

    #[test]
    fn test_placeholders_fill_cells() {
        let puzzle = validated("across:\n- [1,1] 1. Unknown (3)\ndown:\n- [1,1] 1. Also unknown (XXX)\n");
        assert!(puzzle.is_valid(), "{:?}", puzzle.errors);
        assert_eq!(cell(&puzzle, 3, 1), Some('X'));
        assert_eq!(cell(&puzzle, 1, 3), Some('X'));
    }
}
