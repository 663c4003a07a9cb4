//! Game session - the state a front-end holds between frames

use tracing::{debug, warn};

use tui_crush_core::{
    calculate_level, find_valid_move, has_valid_moves, initial_board, is_valid_swap, swap_tiles,
    Board, CascadeStepper, CoreError, EngineConfig, Result, SimpleRng, TileSource,
};

use crate::config::GameConfig;
use crate::events::{Feedback, GameSummary, SessionEvent};
use crate::snapshot::SessionSnapshot;
use crate::types::{GameAction, Pos};

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Paused, game over, or a cascade is still resolving
    Ignored,
    Selected,
    Deselected,
    /// Not a legal swap; the clicked cell is now selected
    Rejected,
    /// Legal swap applied; a cascade is in flight
    Swapped,
}

/// Cascade in progress plus the time spent in its current step
#[derive(Debug, Clone)]
struct Flight {
    stepper: CascadeStepper,
    timer_ms: u32,
}

/// One player's game: board, selection, moves, score, and the cascade
/// currently resolving, if any.
///
/// Cascades are paced by [`tick`](Self::tick). With both pauses at zero
/// (see [`GameConfig::instant`]) a swap resolves inside the click.
#[derive(Debug, Clone)]
pub struct GameSession<R: TileSource = SimpleRng> {
    config: GameConfig,
    rng: R,
    /// Settled board; stale while `flight` is set
    board: Board,
    flight: Option<Flight>,
    cursor: Pos,
    selected: Option<Pos>,
    hint: Option<(Pos, Pos)>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    score: u32,
    moves: u32,
    level: u32,
    /// Chain depth of the last settled swap
    combo: u32,
    best_combo: u32,
    paused: bool,
    game_over: bool,
    /// Pending events (drained by the presenter).
    events: Vec<SessionEvent>,
}

impl GameSession<SimpleRng> {
    /// Start a game drawing tiles from a [`SimpleRng`] seeded with `config.seed`
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = SimpleRng::new(config.seed);
        Self::with_source(config, rng)
    }
}

impl<R: TileSource> GameSession<R> {
    /// Start a game on a freshly dealt board
    pub fn with_source(config: GameConfig, mut rng: R) -> Result<Self> {
        config.engine.validate()?;
        let board = deal(&config.engine, &mut rng)?;
        debug!(size = config.engine.size, seed = config.seed, "game started");
        Ok(Self::assemble(config, rng, board))
    }

    /// Start a game on a given board.
    ///
    /// The board must match the configured size and be settled. A deadlocked
    /// board yields a session that is already over.
    pub fn from_board(config: GameConfig, board: Board, rng: R) -> Result<Self> {
        config.engine.validate()?;
        if board.size() != config.engine.size {
            let (got, want) = (board.size(), config.engine.size);
            return Err(CoreError::InvalidConfig(format!(
                "board is {got}x{got} but the session expects {want}x{want}"
            )));
        }
        let playable = has_valid_moves(&board)?;

        let mut session = Self::assemble(config, rng, board);
        if !playable {
            session.end_game();
        }
        Ok(session)
    }

    fn assemble(config: GameConfig, rng: R, board: Board) -> Self {
        Self {
            moves: config.initial_moves,
            config,
            rng,
            board,
            flight: None,
            cursor: Pos::default(),
            selected: None,
            hint: None,
            episode_id: 0,
            score: 0,
            level: 1,
            combo: 0,
            best_combo: 0,
            paused: false,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board; while a cascade resolves this shows its flagged or
    /// falling tiles.
    pub fn board(&self) -> &Board {
        match &self.flight {
            Some(flight) => flight.stepper.board(),
            None => &self.board,
        }
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Swap suggested by the last `Hint` action
    pub fn hint(&self) -> Option<(Pos, Pos)> {
        self.hint
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Chain depth of the last settled swap (0 when it cleared one pass)
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Deepest chain of the game so far
    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True while a cascade is in flight
    pub fn resolving(&self) -> bool {
        self.flight.is_some()
    }

    /// Depth of the in-flight cascade (0 when idle)
    pub fn cascade_depth(&self) -> u32 {
        self.flight.as_ref().map_or(0, |f| f.stepper.depth())
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            level: self.level,
            moves_used: self.config.initial_moves.saturating_sub(self.moves),
            max_combo: self.best_combo,
        }
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Click on a cell.
    ///
    /// Out-of-range positions are an error even when the click would be
    /// ignored.
    pub fn click(&mut self, pos: Pos) -> Result<ClickOutcome> {
        self.board().check(pos)?;
        if self.paused || self.game_over || self.flight.is_some() {
            return Ok(ClickOutcome::Ignored);
        }
        self.hint = None;

        let Some(from) = self.selected else {
            self.selected = Some(pos);
            self.events.push(SessionEvent::Selected {
                pos,
                feedback: Feedback::Light,
            });
            return Ok(ClickOutcome::Selected);
        };

        if from == pos {
            self.selected = None;
            self.events.push(SessionEvent::Deselected { pos });
            return Ok(ClickOutcome::Deselected);
        }

        if !is_valid_swap(&self.board, from, pos)? {
            self.selected = Some(pos);
            self.events.push(SessionEvent::SwapRejected {
                from,
                to: pos,
                feedback: Feedback::Light,
            });
            return Ok(ClickOutcome::Rejected);
        }

        swap_tiles(&mut self.board, from, pos)?;
        self.selected = None;
        self.events.push(SessionEvent::SwapAccepted { from, to: pos });
        self.flight = Some(Flight {
            stepper: CascadeStepper::new(self.board.clone()),
            timer_ms: 0,
        });

        // The first pass is flagged right away; later steps wait for ticks
        self.advance()?;
        self.pump()?;
        Ok(ClickOutcome::Swapped)
    }

    /// Advance the in-flight cascade by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<()> {
        if self.paused || self.game_over {
            return Ok(());
        }
        let Some(flight) = self.flight.as_mut() else {
            return Ok(());
        };
        flight.timer_ms = flight.timer_ms.saturating_add(elapsed_ms);
        self.pump()
    }

    /// Apply a player action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool> {
        let size = self.config.engine.size;
        match action {
            GameAction::CursorUp => Ok(self.move_cursor(self.cursor.row.checked_sub(1), None)),
            GameAction::CursorDown => Ok(self.move_cursor(
                Some(self.cursor.row + 1).filter(|&r| r < size),
                None,
            )),
            GameAction::CursorLeft => Ok(self.move_cursor(None, self.cursor.col.checked_sub(1))),
            GameAction::CursorRight => Ok(self.move_cursor(
                None,
                Some(self.cursor.col + 1).filter(|&c| c < size),
            )),
            GameAction::Select => {
                let outcome = self.click(self.cursor)?;
                Ok(outcome != ClickOutcome::Ignored)
            }
            GameAction::Hint => {
                if self.paused || self.game_over || self.flight.is_some() {
                    return Ok(false);
                }
                self.hint = find_valid_move(&self.board)?;
                if let Some((a, _)) = self.hint {
                    self.cursor = a;
                }
                Ok(self.hint.is_some())
            }
            GameAction::Pause => {
                if self.game_over {
                    return Ok(false);
                }
                self.paused = !self.paused;
                Ok(true)
            }
            GameAction::Restart => {
                self.restart()?;
                Ok(true)
            }
        }
    }

    /// Deal a new board with the same config. The tile source carries on.
    pub fn restart(&mut self) -> Result<()> {
        let board = deal(&self.config.engine, &mut self.rng)?;
        let next_episode = self.episode_id.wrapping_add(1);

        self.board = board;
        self.flight = None;
        self.cursor = Pos::default();
        self.selected = None;
        self.hint = None;
        self.episode_id = next_episode;
        self.score = 0;
        self.moves = self.config.initial_moves;
        self.level = 1;
        self.combo = 0;
        self.best_combo = 0;
        self.paused = false;
        self.game_over = false;
        self.events.clear();
        debug!(episode = next_episode, "game restarted");
        Ok(())
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let board = self.board();
        board.write_id_grid(&mut out.board);
        out.matched.clear();
        out.matched.extend(board.matched_positions());

        out.cursor = self.cursor;
        out.selected = self.selected;
        out.hint = self.hint;
        out.episode_id = self.episode_id;
        out.score = self.score;
        out.moves = self.moves;
        out.level = self.level;
        out.combo = self.combo;
        out.cascade_depth = self.cascade_depth();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.resolving = self.resolving();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn move_cursor(&mut self, row: Option<usize>, col: Option<usize>) -> bool {
        let next = Pos::new(row.unwrap_or(self.cursor.row), col.unwrap_or(self.cursor.col));
        let moved = next != self.cursor && (row.is_some() || col.is_some());
        self.cursor = next;
        moved
    }

    /// Run every cascade step whose pause has elapsed.
    fn pump(&mut self) -> Result<()> {
        while let Some(flight) = self.flight.as_mut() {
            let wait = if flight.stepper.awaiting_collapse() {
                self.config.match_pause_ms
            } else {
                self.config.fall_pause_ms
            };
            if flight.timer_ms < wait {
                return Ok(());
            }
            flight.timer_ms -= wait;
            self.advance()?;
        }
        Ok(())
    }

    /// Take one half-step of the in-flight cascade.
    fn advance(&mut self) -> Result<()> {
        let Some(flight) = self.flight.as_mut() else {
            return Ok(());
        };
        if flight.stepper.awaiting_collapse() {
            flight.stepper.collapse(&self.config.engine, &mut self.rng);
            return Ok(());
        }

        match flight.stepper.mark(&self.config.engine) {
            Ok(Some(pass)) => {
                let feedback = Feedback::for_pass(pass.cells.len());
                self.events.push(SessionEvent::Matched { pass, feedback });
                Ok(())
            }
            Ok(None) => match self.flight.take() {
                Some(flight) => self.settle(flight.stepper),
                None => Ok(()),
            },
            Err(err) => {
                if let Some(flight) = self.flight.take() {
                    self.board = flight.stepper.finish().board;
                }
                warn!(error = %err, "cascade aborted");
                self.end_game();
                Err(err)
            }
        }
    }

    fn settle(&mut self, stepper: CascadeStepper) -> Result<()> {
        let outcome = stepper.finish();
        self.board = outcome.board;
        self.score = self.score.saturating_add(outcome.total_score);
        self.moves = self.moves.saturating_sub(1);
        self.level = calculate_level(self.score, self.config.level_score_threshold);
        self.combo = outcome.max_combo;
        self.best_combo = self.best_combo.max(outcome.max_combo);
        self.events.push(SessionEvent::Settled {
            score: outcome.total_score,
            max_combo: outcome.max_combo,
        });

        if self.moves == 0 || !has_valid_moves(&self.board)? {
            self.end_game();
        }
        Ok(())
    }

    fn end_game(&mut self) {
        self.game_over = true;
        self.selected = None;
        self.hint = None;
        let summary = self.summary();
        debug!(
            score = summary.score,
            level = summary.level,
            moves_used = summary.moves_used,
            "game over"
        );
        self.events.push(SessionEvent::GameOver {
            summary,
            feedback: Feedback::Heavy,
        });
    }
}

/// Initializer board that has at least one legal swap
fn deal(config: &EngineConfig, rng: &mut impl TileSource) -> Result<Board> {
    for round in 0..config.max_init_rounds {
        let board = initial_board(config, rng)?;
        if has_valid_moves(&board)? {
            debug!(redeals = round, "board dealt");
            return Ok(board);
        }
    }
    warn!(rounds = config.max_init_rounds, "no playable board dealt");
    Err(CoreError::InitNotConverged {
        rounds: config.max_init_rounds,
    })
}
