//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`.
//! Set `CRUSH_LOG_PATH` to write tracing output to a file; the terminal
//! itself is owned by the game.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_crush::engine::{GameConfig, GameSession, SessionEvent, SessionSnapshot};
use tui_crush::input::{handle_key_event, should_quit};
use tui_crush::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_crush::types::TICK_MS;

fn main() -> Result<()> {
    init_tracing()?;

    let config = GameConfig::from_env();
    let mut session = GameSession::new(config).context("failed to start game")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    let _ = term.exit();
    result
}

fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("CRUSH_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tui_crush=debug")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    info!(path = %path, "logging enabled");
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Err(err) = session.apply_action(action) {
                            warn!(error = %err, ?action, "action failed");
                        }
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = session.config().engine.size;
                    if let Some(pos) = view.hit_test(size, mouse.column, mouse.row, viewport) {
                        if let Err(err) = session.click(pos) {
                            warn!(error = %err, "click failed");
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            if let Err(err) = session.tick(elapsed_ms) {
                // The session has already ended the game
                warn!(error = %err, "cascade aborted");
            }
        }

        for event in session.take_events() {
            match event {
                SessionEvent::GameOver { summary, .. } => info!(
                    score = summary.score,
                    level = summary.level,
                    moves_used = summary.moves_used,
                    max_combo = summary.max_combo,
                    "game over"
                ),
                other => debug!(event = ?other, "session event"),
            }
        }
    }
}
