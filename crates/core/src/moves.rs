//! Move-existence scan (deadlock detection)

use crate::board::Board;
use crate::error::{CoreError, Result};
use crate::matcher::has_match;
use crate::swap::is_valid_swap;
use crate::types::Pos;

/// First legal swap in scan order, or `None` when the board is deadlocked.
///
/// Cells are visited row-major; for each cell the right neighbour is tried
/// before the bottom neighbour. The board must be settled.
pub fn find_valid_move(board: &Board) -> Result<Option<(Pos, Pos)>> {
    if !board.is_full() || has_match(board) {
        return Err(CoreError::Unsettled);
    }

    let size = board.size();
    for row in 0..size {
        for col in 0..size {
            let here = Pos::new(row, col);
            if col + 1 < size && is_valid_swap(board, here, Pos::new(row, col + 1))? {
                return Ok(Some((here, Pos::new(row, col + 1))));
            }
            if row + 1 < size && is_valid_swap(board, here, Pos::new(row + 1, col))? {
                return Ok(Some((here, Pos::new(row + 1, col))));
            }
        }
    }
    Ok(None)
}

/// Whether any adjacent swap on a settled board produces a match.
pub fn has_valid_moves(board: &Board) -> Result<bool> {
    Ok(find_valid_move(board)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind::{self, *};

    fn from(rows: &[&[TileKind]]) -> Board {
        let rows: Vec<Vec<Option<TileKind>>> = rows
            .iter()
            .map(|r| r.iter().map(|&k| Some(k)).collect())
            .collect();
        Board::from_kinds(&rows).unwrap()
    }

    #[test]
    fn test_deadlocked_board() {
        // Four kinds laid out so no swap lines up three
        let b = from(&[
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
        ]);
        assert_eq!(find_valid_move(&b), Ok(None));
        assert_eq!(has_valid_moves(&b), Ok(false));
    }

    #[test]
    fn test_finds_first_move_in_scan_order() {
        let b = from(&[
            &[Eth, Eth, Sol, Btc],
            &[Sol, Btc, Eth, Doge],
            &[Btc, Sol, Doge, Ton],
            &[Ton, Doge, Btc, Sol],
        ]);
        assert_eq!(
            find_valid_move(&b),
            Ok(Some((Pos::new(0, 2), Pos::new(1, 2))))
        );
        assert_eq!(has_valid_moves(&b), Ok(true));
    }

    #[test]
    fn test_unsettled_board_is_rejected() {
        let live = from(&[
            &[Eth, Eth, Eth, Btc],
            &[Sol, Btc, Sol, Doge],
            &[Btc, Sol, Doge, Ton],
            &[Ton, Doge, Btc, Sol],
        ]);
        assert_eq!(has_valid_moves(&live), Err(CoreError::Unsettled));

        let mut holey = from(&[
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
        ]);
        holey.set_kind(Pos::new(2, 2), None);
        assert_eq!(find_valid_move(&holey), Err(CoreError::Unsettled));
    }
}
