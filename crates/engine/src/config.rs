//! Session configuration.

use tui_crush_core::{EngineConfig, Palette, RefillPolicy};

use crate::types::{FALL_PAUSE_MS, INITIAL_MOVES, LEVEL_SCORE_THRESHOLD, MATCH_PAUSE_MS};

/// Everything a [`GameSession`](crate::GameSession) needs to start a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub initial_moves: u32,
    pub level_score_threshold: u32,
    /// How long matched tiles stay flagged before collapsing
    pub match_pause_ms: u32,
    /// How long fallen tiles settle before the next pass is examined
    pub fall_pause_ms: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            initial_moves: INITIAL_MOVES,
            level_score_threshold: LEVEL_SCORE_THRESHOLD,
            match_pause_ms: MATCH_PAUSE_MS,
            fall_pause_ms: FALL_PAUSE_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Resolve cascades within the triggering call instead of across ticks
    pub fn instant(mut self) -> Self {
        self.match_pause_ms = 0;
        self.fall_pause_ms = 0;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Create from environment variables
    ///
    /// - `CRUSH_BOARD_SIZE`: board edge length (default 8)
    /// - `CRUSH_PALETTE_SIZE`: number of tile kinds (default 6)
    /// - `CRUSH_MOVES`: swaps per game (default 30)
    /// - `CRUSH_SEED`: RNG seed (default 1)
    /// - `CRUSH_REFILL`: `random` or `avoid` (default random)
    ///
    /// Unparsable values fall back to the defaults; range checks happen when
    /// the session validates the engine config.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let size = env::var("CRUSH_BOARD_SIZE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.engine.size);

        let palette = env::var("CRUSH_PALETTE_SIZE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .map(Palette::first)
            .unwrap_or_default();

        let refill = env::var("CRUSH_REFILL")
            .ok()
            .and_then(|s| RefillPolicy::from_str(&s))
            .unwrap_or_default();

        let initial_moves = env::var("CRUSH_MOVES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.initial_moves);

        let seed = env::var("CRUSH_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            engine: defaults
                .engine
                .with_size(size)
                .with_palette(palette)
                .with_refill(refill),
            initial_moves,
            seed,
            ..defaults
        }
    }
}
