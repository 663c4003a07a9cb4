//! Board module - manages the tile grid
//!
//! The board is an N x N grid where each cell holds an optional tile kind plus
//! two presentation flags. Uses a flat row-major vector for cache locality on
//! the match and move-scan hot paths.
//! Coordinates: `Pos { row, col }`, row 0 at the top, gravity toward row N-1.

use crate::error::{CoreError, Result};
use crate::types::{Pos, TileKind};

/// A single grid cell.
///
/// `kind` is `None` only while a collapse is being refilled. `matched` and
/// `animating` are read by renderers; only gravity looks at `matched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub kind: Option<TileKind>,
    pub matched: bool,
    pub animating: bool,
}

impl Cell {
    pub fn with_kind(kind: TileKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// The game board - `size` x `size` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with no tiles
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    /// Build from rows of tile kinds; every row must be `rows.len()` long
    pub fn from_kinds(rows: &[Vec<Option<TileKind>>]) -> Result<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(CoreError::InvalidConfig(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                size
            )));
        }
        let cells = rows
            .iter()
            .flatten()
            .map(|&kind| Cell {
                kind,
                ..Cell::default()
            })
            .collect();
        Ok(Self { size, cells })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Fail with `OutOfBounds` unless `pos` is on the board
    pub fn check(&self, pos: Pos) -> Result<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(CoreError::OutOfBounds {
                pos,
                size: self.size,
            })
        }
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).map(move |idx| &mut self.cells[idx])
    }

    /// Tile kind at `pos` (None when empty or out of bounds)
    #[inline]
    pub fn kind(&self, pos: Pos) -> Option<TileKind> {
        self.get(pos).and_then(|cell| cell.kind)
    }

    /// Set tile kind at `pos`
    /// Returns false if out of bounds
    pub fn set_kind(&mut self, pos: Pos, kind: Option<TileKind>) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                cell.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Exchange the tile kinds at `a` and `b`, leaving flags in place
    pub fn swap_kinds(&mut self, a: Pos, b: Pos) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        let ia = a.row * self.size + a.col;
        let ib = b.row * self.size + b.col;
        let kind_a = self.cells[ia].kind;
        self.cells[ia].kind = self.cells[ib].kind;
        self.cells[ib].kind = kind_a;
        Ok(())
    }

    /// Whether every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.kind.is_some())
    }

    /// Flag the given positions as matched (out-of-bounds entries are ignored)
    pub fn mark_matched<I: IntoIterator<Item = Pos>>(&mut self, positions: I) {
        for pos in positions {
            if let Some(cell) = self.get_mut(pos) {
                cell.matched = true;
            }
        }
    }

    /// Drop every presentation flag
    pub fn clear_flags(&mut self) {
        for cell in &mut self.cells {
            cell.matched = false;
            cell.animating = false;
        }
    }

    /// Positions currently flagged as matched, row-major
    pub fn matched_positions(&self) -> Vec<Pos> {
        self.positions()
            .filter(|&pos| self.cells[pos.row * self.size + pos.col].matched)
            .collect()
    }

    /// Every position on the board, row-major
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Pos::new(row, col)))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to rows of tile kinds for testing/display
    pub fn to_kinds(&self) -> Vec<Vec<Option<TileKind>>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|cell| cell.kind).collect())
            .collect()
    }

    /// Tile ids as a grid (0 = empty), for snapshots
    pub fn write_id_grid(&self, out: &mut Vec<Vec<u8>>) {
        out.clear();
        out.extend(
            self.cells
                .chunks(self.size.max(1))
                .map(|row| row.iter().map(|cell| cell.kind.map_or(0, |k| k.id())).collect()),
        );
    }
}
