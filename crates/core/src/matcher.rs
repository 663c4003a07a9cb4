//! Match detection - finds runs of three or more equal tiles
//!
//! Rows are scanned left to right and columns top to bottom. A run is a
//! maximal stretch of cells holding the same kind; empty cells break runs.
//! Every run of length `MIN_RUN` or more is emitted whole, and a cell that sits
//! on both a horizontal and a vertical run appears once in the result.

use crate::board::Board;
use crate::types::{Pos, TileKind, MIN_RUN};

/// Direction a run extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// One maximal run found during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub axis: Axis,
    /// First cell (leftmost or topmost)
    pub start: Pos,
    pub len: usize,
    pub kind: TileKind,
}

impl Run {
    /// Cells covered by the run, in scan order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.len).map(move |i| match self.axis {
            Axis::Row => Pos::new(self.start.row, self.start.col + i),
            Axis::Col => Pos::new(self.start.row + i, self.start.col),
        })
    }
}

/// Deduplicated set of matched cells from one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    /// Cells in first-seen order
    cells: Vec<Pos>,
    runs: Vec<Run>,
    /// Membership bitmap indexed like the board
    seen: Vec<bool>,
    size: usize,
}

impl MatchSet {
    fn with_size(size: usize) -> Self {
        Self {
            cells: Vec::new(),
            runs: Vec::new(),
            seen: vec![false; size * size],
            size,
        }
    }

    fn add_run(&mut self, run: Run) {
        for pos in run.positions() {
            let idx = pos.row * self.size + pos.col;
            if !self.seen[idx] {
                self.seen[idx] = true;
                self.cells.push(pos);
            }
        }
        self.runs.push(run);
    }

    /// Number of distinct matched cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size && self.seen[pos.row * self.size + pos.col]
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// The runs that produced this set (rows first, then columns)
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn into_cells(self) -> Vec<Pos> {
        self.cells
    }
}

/// Scan every row and column for runs of `MIN_RUN` or more.
pub fn find_matches(board: &Board) -> MatchSet {
    let size = board.size();
    let mut matches = MatchSet::with_size(size);

    for row in 0..size {
        scan_line(board, &mut matches, Axis::Row, |i| Pos::new(row, i));
    }
    for col in 0..size {
        scan_line(board, &mut matches, Axis::Col, |i| Pos::new(i, col));
    }

    matches
}

/// Whether the board has at least one run, without building the set.
pub fn has_match(board: &Board) -> bool {
    let size = board.size();
    (0..size).any(|line| {
        line_has_run(board, |i| Pos::new(line, i)) || line_has_run(board, |i| Pos::new(i, line))
    })
}

fn scan_line<F: Fn(usize) -> Pos>(board: &Board, out: &mut MatchSet, axis: Axis, at: F) {
    let size = board.size();
    let mut run_start = 0;

    // `i == size` closes the trailing run at the grid edge
    for i in 1..=size {
        let current = board.kind(at(run_start));
        let continues = i < size && current.is_some() && board.kind(at(i)) == current;
        if continues {
            continue;
        }
        if let Some(kind) = current {
            let len = i - run_start;
            if len >= MIN_RUN {
                out.add_run(Run {
                    axis,
                    start: at(run_start),
                    len,
                    kind,
                });
            }
        }
        run_start = i;
    }
}

fn line_has_run<F: Fn(usize) -> Pos>(board: &Board, at: F) -> bool {
    let size = board.size();
    let mut run_len = 0;
    let mut last: Option<TileKind> = None;
    for i in 0..size {
        let kind = board.kind(at(i));
        if kind.is_some() && kind == last {
            run_len += 1;
        } else {
            run_len = 1;
            last = kind;
        }
        if last.is_some() && run_len >= MIN_RUN {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind::*;

    fn board(rows: &[&[Option<TileKind>]]) -> Board {
        let rows: Vec<Vec<Option<TileKind>>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_kinds(&rows).unwrap()
    }

    #[test]
    fn test_no_matches_on_checkerboard() {
        let b = board(&[
            &[Some(Btc), Some(Eth), Some(Btc), Some(Eth)],
            &[Some(Eth), Some(Btc), Some(Eth), Some(Btc)],
            &[Some(Btc), Some(Eth), Some(Btc), Some(Eth)],
            &[Some(Eth), Some(Btc), Some(Eth), Some(Btc)],
        ]);
        assert!(find_matches(&b).is_empty());
        assert!(!has_match(&b));
    }

    #[test]
    fn test_run_at_grid_edge() {
        let b = board(&[
            &[Some(Btc), Some(Sol), Some(Sol), Some(Sol)],
            &[Some(Eth), Some(Btc), Some(Eth), Some(Btc)],
            &[Some(Btc), Some(Eth), Some(Btc), Some(Eth)],
            &[Some(Eth), Some(Btc), Some(Eth), Some(Btc)],
        ]);
        let m = find_matches(&b);
        assert_eq!(m.cells(), &[Pos::new(0, 1), Pos::new(0, 2), Pos::new(0, 3)]);
        assert_eq!(m.runs().len(), 1);
        assert_eq!(m.runs()[0].kind, Sol);
        assert!(has_match(&b));
    }

    #[test]
    fn test_long_run_is_single_run() {
        let b = board(&[
            &[Some(Ton), Some(Ton), Some(Ton), Some(Ton)],
            &[Some(Eth), Some(Btc), Some(Eth), Some(Btc)],
            &[Some(Btc), Some(Eth), Some(Btc), Some(Eth)],
            &[Some(Eth), Some(Btc), Some(Eth), Some(Btc)],
        ]);
        let m = find_matches(&b);
        assert_eq!(m.len(), 4);
        assert_eq!(m.runs().len(), 1);
        assert_eq!(m.runs()[0].len, 4);
        assert_eq!(m.runs()[0].axis, Axis::Row);
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let b = board(&[
            &[Some(Eth), Some(Eth), None, Some(Eth)],
            &[None, None, None, None],
            &[None, None, None, None],
            &[None, None, None, None],
        ]);
        assert!(find_matches(&b).is_empty());
        assert!(!has_match(&b));
    }

    #[test]
    fn test_cross_shape_dedups_shared_cell() {
        // Eth row through (1, 0..3) and Eth column through (0..3, 1) share (1, 1)
        let b = board(&[
            &[Some(Btc), Some(Eth), Some(Btc), Some(Sol)],
            &[Some(Eth), Some(Eth), Some(Eth), Some(Btc)],
            &[Some(Sol), Some(Eth), Some(Sol), Some(Btc)],
            &[Some(Btc), Some(Sol), Some(Btc), Some(Sol)],
        ]);
        let m = find_matches(&b);
        assert_eq!(m.runs().len(), 2);
        assert_eq!(m.len(), 5);
        assert_eq!(m.iter().filter(|&p| p == Pos::new(1, 1)).count(), 1);
        assert!(m.contains(Pos::new(2, 1)));
        assert!(!m.contains(Pos::new(3, 1)));
        assert!(!m.contains(Pos::new(9, 9)));
    }

    #[test]
    fn test_vertical_run_positions() {
        let run = Run {
            axis: Axis::Col,
            start: Pos::new(1, 2),
            len: 3,
            kind: Doge,
        };
        let cells: Vec<Pos> = run.positions().collect();
        assert_eq!(cells, vec![Pos::new(1, 2), Pos::new(2, 2), Pos::new(3, 2)]);
    }
}
