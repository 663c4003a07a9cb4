//! Engine configuration.

use arrayvec::ArrayVec;

use crate::error::{CoreError, Result};
use crate::types::{
    TileKind, BOARD_SIZE, COMBO_MULTIPLIER, FILL_RETRY_LIMIT, MAX_BOARD_SIZE, MAX_CASCADE_PASSES,
    MAX_INIT_ROUNDS, MIN_RUN, POINTS_PER_MATCH,
};

/// The tile kinds a board draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    kinds: ArrayVec<TileKind, { TileKind::COUNT }>,
}

impl Palette {
    /// The first `count` kinds of [`TileKind::ALL`] (clamped to the full set).
    pub fn first(count: usize) -> Self {
        Self {
            kinds: TileKind::ALL.iter().copied().take(count).collect(),
        }
    }

    /// Build from an explicit list; duplicates are dropped.
    pub fn from_kinds(kinds: &[TileKind]) -> Self {
        let mut out = ArrayVec::new();
        for &kind in kinds {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        Self { kinds: out }
    }

    pub fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn contains(&self, kind: TileKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::first(TileKind::COUNT)
    }
}

/// How vacated cells are refilled after a collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefillPolicy {
    /// Plain uniform draws. Refills may complete new runs on their own
    /// ("lucky cascades").
    #[default]
    Random,
    /// Draw with the same run-avoidance retries as the initial fill.
    AvoidMatches,
}

impl RefillPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Some(RefillPolicy::Random),
            "avoid" | "avoid_matches" | "avoidmatches" => Some(RefillPolicy::AvoidMatches),
            _ => None,
        }
    }
}

/// Parameters of the board/match/cascade engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Board edge length; boards are `size` x `size`.
    pub size: usize,
    pub palette: Palette,
    pub points_per_match: u32,
    /// Score for pass `d` of a cascade is scaled by `combo_multiplier^d`.
    pub combo_multiplier: f64,
    /// Draws tried per cell before accepting a tile that completes a run.
    pub fill_retries: u32,
    pub max_cascade_passes: u32,
    pub max_init_rounds: u32,
    pub refill: RefillPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            palette: Palette::default(),
            points_per_match: POINTS_PER_MATCH,
            combo_multiplier: COMBO_MULTIPLIER,
            fill_retries: FILL_RETRY_LIMIT,
            max_cascade_passes: MAX_CASCADE_PASSES,
            max_init_rounds: MAX_INIT_ROUNDS,
            refill: RefillPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_refill(mut self, refill: RefillPolicy) -> Self {
        self.refill = refill;
        self
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_RUN || self.size > MAX_BOARD_SIZE {
            return Err(CoreError::InvalidConfig(format!(
                "board size {} outside {}..={}",
                self.size, MIN_RUN, MAX_BOARD_SIZE
            )));
        }
        if self.palette.len() < MIN_RUN {
            return Err(CoreError::InvalidConfig(format!(
                "palette needs at least {} kinds, got {}",
                MIN_RUN,
                self.palette.len()
            )));
        }
        if !self.combo_multiplier.is_finite() || self.combo_multiplier < 1.0 {
            return Err(CoreError::InvalidConfig(format!(
                "combo multiplier {} must be >= 1.0",
                self.combo_multiplier
            )));
        }
        if self.fill_retries == 0 || self.max_cascade_passes == 0 || self.max_init_rounds == 0 {
            return Err(CoreError::InvalidConfig(
                "retry and iteration caps must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
