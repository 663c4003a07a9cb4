//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic attached, making them usable in
//! any context (core engine, session, terminal rendering).
//!
//! # Board Dimensions
//!
//! The default board is an 8x8 square grid:
//!
//! - **Rows**: indexed 0-7, top to bottom
//! - **Columns**: indexed 0-7, left to right
//! - Gravity pulls tiles toward row 7
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_MATCH` | 100 | Points per matched tile |
//! | `COMBO_MULTIPLIER` | 1.5 | Per-pass multiplier inside one cascade |
//! | `LEVEL_SCORE_THRESHOLD` | 10000 | Score needed per level |
//! | `INITIAL_MOVES` | 30 | Swaps available per game |
//!
//! # Presentation Timing
//!
//! - `MATCH_PAUSE_MS`: 200ms - matched tiles stay visible before collapsing
//! - `FALL_PAUSE_MS`: 300ms - fallen tiles settle before the next pass
//!
//! # Examples
//!
//! ```
//! use tui_crush_types::{GameAction, Pos, TileKind, BOARD_SIZE};
//!
//! let kind = TileKind::from_str("eth").unwrap();
//! assert_eq!(kind, TileKind::Eth);
//! assert_eq!(kind.symbol(), 'Ξ');
//!
//! let a = Pos::new(2, 3);
//! assert!(a.is_adjacent(Pos::new(2, 4)));
//! assert!(!a.is_adjacent(Pos::new(3, 4)));
//!
//! assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default board edge length (8x8)
pub const BOARD_SIZE: usize = 8;

/// Largest board edge length the engine accepts
pub const MAX_BOARD_SIZE: usize = 32;

/// Shortest run that counts as a match
pub const MIN_RUN: usize = 3;

/// Points awarded per matched tile
pub const POINTS_PER_MATCH: u32 = 100;

/// Score multiplier applied per cascade pass (`multiplier^depth`)
pub const COMBO_MULTIPLIER: f64 = 1.5;

/// Attempts made to draw a tile that does not complete a run
pub const FILL_RETRY_LIMIT: u32 = 10;

/// Passes a single cascade may take before it is reported as runaway
pub const MAX_CASCADE_PASSES: u32 = 50;

/// Clear/refill rounds the initializer may take before giving up
pub const MAX_INIT_ROUNDS: u32 = 1_000;

/// Swaps available per game
pub const INITIAL_MOVES: u32 = 30;

/// Score needed to advance one level
pub const LEVEL_SCORE_THRESHOLD: u32 = 10_000;

/// Matched tiles stay flagged this long before they collapse
pub const MATCH_PAUSE_MS: u32 = 200;

/// Fallen tiles settle this long before the next pass is examined
pub const FALL_PAUSE_MS: u32 = 300;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Tile kinds on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Btc,
    Eth,
    Doge,
    Sol,
    Usdt,
    Ton,
}

impl TileKind {
    /// Number of tile kinds
    pub const COUNT: usize = 6;

    /// Every kind, in palette order
    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::Btc,
        TileKind::Eth,
        TileKind::Doge,
        TileKind::Sol,
        TileKind::Usdt,
        TileKind::Ton,
    ];

    /// Parse tile kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "btc" => Some(TileKind::Btc),
            "eth" => Some(TileKind::Eth),
            "doge" => Some(TileKind::Doge),
            "sol" => Some(TileKind::Sol),
            "usdt" => Some(TileKind::Usdt),
            "ton" => Some(TileKind::Ton),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Btc => "btc",
            TileKind::Eth => "eth",
            TileKind::Doge => "doge",
            TileKind::Sol => "sol",
            TileKind::Usdt => "usdt",
            TileKind::Ton => "ton",
        }
    }

    /// Single-glyph symbol used by the terminal view
    pub fn symbol(&self) -> char {
        match self {
            TileKind::Btc => '₿',
            TileKind::Eth => 'Ξ',
            TileKind::Doge => 'Ð',
            TileKind::Sol => '◎',
            TileKind::Usdt => '₮',
            TileKind::Ton => '◆',
        }
    }

    /// Stable 1-based id (0 is reserved for "no tile" in grids)
    pub fn id(&self) -> u8 {
        match self {
            TileKind::Btc => 1,
            TileKind::Eth => 2,
            TileKind::Doge => 3,
            TileKind::Sol => 4,
            TileKind::Usdt => 5,
            TileKind::Ton => 6,
        }
    }

    /// Inverse of [`id`](Self::id); 0 and unknown ids give `None`
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=6 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Grid position, `row` counted from the top and `col` from the left
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions
    pub fn distance(&self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when `other` is exactly one grid step away (no diagonals)
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.distance(other) == 1
    }
}

/// Player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Select,
    Hint,
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" | "up" => Some(GameAction::CursorUp),
            "cursordown" | "down" => Some(GameAction::CursorDown),
            "cursorleft" | "left" => Some(GameAction::CursorLeft),
            "cursorright" | "right" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "hint" => Some(GameAction::Hint),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Hint => "hint",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
