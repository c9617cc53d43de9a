//! GameView: maps a `core::GameSnapshot` plus the HUD into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::particles::BLOCK_PX;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::hud::Hud;
use crate::types::{Cell, CoinKind, LoopState, SpecialTag, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const GOLD: Rgb = Rgb::new(255, 215, 0);
const DOGE_TAN: Rgb = Rgb::new(194, 166, 51);

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

/// Board placement inside the viewport, in terminal cells
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the coin board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let frame = self.frame(viewport);
        let board_w = frame.w - 2;
        let board_h = frame.h - 2;

        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', CellStyle::new(BOARD_BG, BOARD_BG));
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        // Merged cells, then particles over empty cells, then the active piece.
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                match snap.grid[y][x] {
                    Cell::Empty => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                    cell => self.draw_board_cell(fb, frame, x as u16, y as u16, cell),
                }
            }
        }

        self.draw_particles(fb, snap, frame);

        if let Some(piece) = &snap.active {
            for (x, y, cell) in piece.cells() {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, frame, x as u16, y as u16, cell);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, frame);

        match snap.loop_state {
            LoopState::Inactive => {
                self.draw_overlay_text(fb, frame, 0, "COINFALL");
                self.draw_overlay_text(fb, frame, 2, "PRESS ENTER");
            }
            LoopState::Paused => self.draw_overlay_text(fb, frame, 0, "PAUSED"),
            LoopState::GameOver => {
                self.draw_overlay_text(fb, frame, 0, "GAME OVER");
                self.draw_overlay_text(fb, frame, 2, "R TO RESTART");
            }
            LoopState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        // Leave room for the side panel when the terminal is wide enough.
        let x = viewport.width.saturating_sub(w + SIDE_PANEL_W) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame, style: CellStyle) {
        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(f.x + f.w - 1, f.y, '┐', style);
        fb.put_char(f.x, f.y + f.h - 1, '└', style);
        fb.put_char(f.x + f.w - 1, f.y + f.h - 1, '┘', style);

        for dx in 1..f.w - 1 {
            fb.put_char(f.x + dx, f.y, '─', style);
            fb.put_char(f.x + dx, f.y + f.h - 1, '─', style);
        }
        for dy in 1..f.h - 1 {
            fb.put_char(f.x, f.y + dy, '│', style);
            fb.put_char(f.x + f.w - 1, f.y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dimmed();
        self.fill_cell(fb, f, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, cell: Cell) {
        let (symbol, bg) = cell_look(cell);
        let style = CellStyle::new(Rgb::new(20, 20, 20), bg).bold();
        self.fill_cell(fb, f, x, y, ' ', style);
        fb.put_char(f.x + 1 + x * self.cell_w, f.y + 1 + y * self.cell_h, symbol, style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = f.x + 1 + x * self.cell_w;
        let py = f.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_particles(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        for p in &snap.particles {
            let Some((cx, cy)) = p.board_cell() else {
                continue;
            };
            if snap.cell_at(cx as usize, cy as usize).is_filled() {
                continue;
            }
            // Sub-cell column within a wide cell
            let sub = ((p.x % BLOCK_PX) / BLOCK_PX * self.cell_w as f32) as u16;
            let px = f.x + 1 + cx as u16 * self.cell_w + sub.min(self.cell_w - 1);
            let py = f.y + 1 + cy as u16 * self.cell_h;
            let (_, color) = cell_look(p.tag);
            let ch = if p.size >= 10.0 { '*' } else { '·' };
            fb.put_char(px, py, ch, CellStyle::new(color.fade(BOARD_BG, p.alpha), BOARD_BG));
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = f.y;
        fb.put_str(panel_x, y, "COINS", label);
        y += 1;
        for (kind, count) in hud.scoreboard.scores().iter() {
            let (_, color) = cell_look(Cell::Coin(kind));
            let end = fb.put_str(panel_x, y, kind.ticker(), CellStyle::new(color, PANEL_BG).bold());
            fb.put_char(end, y, ':', value);
            fb.put_u32(panel_x + 6, y, count, value);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "LINES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.lines, value);
        y += 2;

        if hud.banners.gold() {
            fb.put_str(panel_x, y, "GOLD EVENT", CellStyle::new(PANEL_BG, GOLD).bold());
            y += 1;
        }
        if hud.banners.doge() {
            let end = fb.put_str(panel_x, y, "DOGE EVENT", CellStyle::new(PANEL_BG, DOGE_TAN).bold());
            let end = fb.put_str(end, y, " (", value);
            let end = fb.put_u32(end, y, snap.doge_blocks_remaining, value);
            fb.put_str(end, y, " left)", value);
            y += 1;
        }
        y += 1;

        let help = CellStyle::new(Rgb::new(140, 140, 150), PANEL_BG).dimmed();
        for line in ["←→ move  ↓ drop", "↑/space rotate", "p pause  r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, f: Frame, row_offset: u16, text: &str) {
        let y = f.y.saturating_add(f.h / 2).saturating_add(row_offset);
        let text_w = text.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Width reserved to the right of the board for the panel
const SIDE_PANEL_W: u16 = 22;

/// Symbol and colour for a cell label
fn cell_look(cell: Cell) -> (char, Rgb) {
    match cell {
        Cell::Empty => (' ', BOARD_BG),
        Cell::Coin(CoinKind::Btc) => ('₿', Rgb::new(247, 147, 26)),
        Cell::Coin(CoinKind::Eth) => ('Ξ', Rgb::new(98, 126, 234)),
        Cell::Coin(CoinKind::Doge) => ('Ð', DOGE_TAN),
        Cell::Coin(CoinKind::Sol) => ('◎', Rgb::new(20, 241, 149)),
        Cell::Coin(CoinKind::Xrp) => ('✕', Rgb::new(0, 170, 228)),
        Cell::Special(SpecialTag::Gold) => ('◆', GOLD),
        Cell::Special(SpecialTag::F) => ('F', Rgb::new(255, 200, 60)),
        Cell::Special(SpecialTag::U) => ('U', Rgb::new(255, 200, 60)),
        Cell::Special(SpecialTag::N) => ('N', Rgb::new(255, 200, 60)),
    }
}
