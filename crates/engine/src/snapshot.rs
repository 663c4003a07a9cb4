use serde::Serialize;

use crate::types::Pos;

/// Plain-data view of a session, cheap to diff and serialize.
///
/// `board` holds tile ids (0 = empty); `matched` lists flagged cells row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub board: Vec<Vec<u8>>,
    pub matched: Vec<Pos>,
    pub cursor: Pos,
    pub selected: Option<Pos>,
    pub hint: Option<(Pos, Pos)>,
    pub episode_id: u32,
    pub score: u32,
    pub moves: u32,
    pub level: u32,
    /// Chain depth of the last settled swap
    pub combo: u32,
    /// Pass index of the in-flight cascade
    pub cascade_depth: u32,
    pub paused: bool,
    pub game_over: bool,
    pub resolving: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.board.clear();
        self.matched.clear();
        self.cursor = Pos::default();
        self.selected = None;
        self.hint = None;
        self.episode_id = 0;
        self.score = 0;
        self.moves = 0;
        self.level = 0;
        self.combo = 0;
        self.cascade_depth = 0;
        self.paused = false;
        self.game_over = false;
        self.resolving = false;
    }

    /// Whether a click would be acted on
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && !self.resolving
    }
}
