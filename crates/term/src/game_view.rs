//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::SessionSnapshot;
use crate::fb::{BoxGlyphs, Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Pos, TileKind};

const BOARD_BG: Rgb = Rgb::new(24, 24, 34);
const MATCH_BG: Rgb = Rgb::new(235, 235, 235);
const HINT_BG: Rgb = Rgb::new(40, 70, 50);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the tile board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns; the middle column holds the glyph.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Three columns leave room for the cursor brackets around the glyph.
        Self {
            cell_w: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal columns and rows the board frame occupies for `size`.
    pub fn frame_size(&self, size: usize) -> (u16, u16) {
        let size = size as u16;
        (size * self.cell_w + 2, size + 2)
    }

    /// Screen coordinates of the leftmost column of board cell `pos`.
    pub fn cell_origin(&self, size: usize, pos: Pos, viewport: Viewport) -> (u16, u16) {
        let frame = self.place(size, viewport);
        (
            frame.x + 1 + pos.col as u16 * self.cell_w,
            frame.y + 1 + pos.row as u16,
        )
    }

    /// Board cell under screen position `(x, y)`, if any (mouse clicks).
    pub fn hit_test(&self, size: usize, x: u16, y: u16, viewport: Viewport) -> Option<Pos> {
        let frame = self.place(size, viewport);
        let inner_x = x.checked_sub(frame.x + 1)?;
        let inner_y = y.checked_sub(frame.y + 1)?;
        let (col, row) = ((inner_x / self.cell_w) as usize, inner_y as usize);
        (row < size && col < size).then_some(Pos::new(row, col))
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport as needed.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let size = snap.board.len();
        let frame = self.place(size, viewport);

        let border = if snap.game_over {
            CellStyle::fg(Rgb::new(200, 80, 80))
        } else {
            CellStyle::fg(Rgb::new(200, 200, 200))
        };
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w.saturating_sub(2),
            frame.h.saturating_sub(2),
            ' ',
            CellStyle::default().on(BOARD_BG),
        );
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, BoxGlyphs::ROUNDED, border);

        for (row, ids) in snap.board.iter().enumerate() {
            for (col, &id) in ids.iter().enumerate() {
                self.draw_cell(fb, frame, snap, Pos::new(row, col), id);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn place(&self, size: usize, viewport: Viewport) -> Frame {
        let (w, h) = self.frame_size(size);
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        // Leave room on the right for the panel when the viewport allows it
        let x = if viewport.width >= w + PANEL_W + 2 {
            viewport.width.saturating_sub(w + PANEL_W + 2) / 2
        } else {
            viewport.width.saturating_sub(w) / 2
        };
        Frame { x, y, w, h }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &SessionSnapshot,
        pos: Pos,
        id: u8,
    ) {
        let px = frame.x + 1 + pos.col as u16 * self.cell_w;
        let py = frame.y + 1 + pos.row as u16;

        let hinted = snap.hint.is_some_and(|(a, b)| a == pos || b == pos);
        let bg = if snap.matched.contains(&pos) {
            MATCH_BG
        } else if hinted {
            HINT_BG
        } else {
            BOARD_BG
        };

        let (ch, mut style) = match TileKind::from_id(id) {
            Some(kind) => (kind.symbol(), CellStyle::fg(tile_color(kind)).on(bg).bold()),
            None => ('·', CellStyle::fg(Rgb::new(90, 90, 100)).on(bg).dim()),
        };
        if snap.selected == Some(pos) {
            style = style.reverse();
        }

        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px + self.cell_w / 2, py, ch, style);

        if snap.cursor == pos && self.cell_w >= 3 {
            let bracket = CellStyle::fg(Rgb::new(255, 255, 255)).on(bg).bold();
            fb.put_char(px, py, '[', bracket);
            fb.put_char(px + self.cell_w - 1, py, ']', bracket);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_W) > viewport.width {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = value.dim();

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("MOVES", snap.moves),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        // Live chain while resolving, otherwise the last swap's chain if any
        let chain = CellStyle::fg(Rgb::new(255, 200, 60)).bold();
        if snap.resolving {
            let x = fb.put_str(panel_x, y, "CHAIN x", chain);
            fb.put_u32(x, y, snap.cascade_depth + 1, chain);
        } else if snap.combo > 0 {
            let x = fb.put_str(panel_x, y, "COMBO x", chain);
            fb.put_u32(x, y, snap.combo + 1, chain);
        }
        y = y.saturating_add(2);

        if y.saturating_add(HELP.len() as u16) <= viewport.height {
            for line in HELP {
                fb.put_str(panel_x, y, line, dim);
                y += 1;
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(0, 0, 0)).bold();
        let padded_w = text.chars().count() as u16 + 2;
        let x = frame.x.saturating_add(frame.w.saturating_sub(padded_w) / 2);
        fb.fill_rect(x, mid_y, padded_w, 1, ' ', style);
        fb.put_str_centered(x, padded_w, mid_y, text, style);
    }
}

const PANEL_W: u16 = 16;

const HELP: [&str; 6] = [
    "arrows  move",
    "space   select",
    "?       hint",
    "p       pause",
    "r       restart",
    "q       quit",
];

fn tile_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Btc => Rgb::new(247, 147, 26),
        TileKind::Eth => Rgb::new(130, 150, 240),
        TileKind::Doge => Rgb::new(210, 180, 70),
        TileKind::Sol => Rgb::new(170, 90, 255),
        TileKind::Usdt => Rgb::new(38, 190, 140),
        TileKind::Ton => Rgb::new(0, 150, 230),
    }
}
