//! TerminalRenderer: the render sink that puts frames on a real terminal.
//!
//! Each frame is drawn into a framebuffer and only the runs of cells that
//! changed since the previous frame are written out.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::{GameSnapshot, RenderSink};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};
use crate::hud::Hud;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    view: GameView,
    hud: Hud,
    viewport: Viewport,
    /// Frame being composed
    next: FrameBuffer,
    /// Frame currently on screen; `None` forces a full redraw
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        Self::with_writer(io::stdout(), Viewport::new(w, h))
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            view: GameView::default(),
            hud: Hud::new(),
            viewport,
            next: FrameBuffer::new(viewport.width, viewport.height),
            shown: None,
            bytes: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// The HUD is fed through its sink traits by event dispatch.
    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Switch to raw mode and the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.write_bytes()
    }

    /// Restore the terminal; safe to call after a failed frame
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.write_bytes()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// New terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.shown = None;
    }

    /// Write the composed frame and keep it as the diff base.
    fn flush_frame(&mut self) -> Result<()> {
        self.bytes.clear();
        match self.shown.as_ref() {
            Some(shown) if shown.width() == self.next.width() && shown.height() == self.next.height() => {
                encode_diff_into(shown, &self.next, &mut self.bytes)?;
            }
            _ => {
                encode_full_into(&self.next, &mut self.bytes)?;
            }
        }
        self.write_bytes()?;

        // Swap so the old frame's allocation is reused for composing.
        match self.shown.as_mut() {
            Some(shown) => std::mem::swap(shown, &mut self.next),
            None => {
                let mut shown = FrameBuffer::new(self.next.width(), self.next.height());
                std::mem::swap(&mut shown, &mut self.next);
                self.shown = Some(shown);
            }
        }
        Ok(())
    }

    fn write_bytes(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes).context("write frame")?;
        self.out.flush().context("flush terminal")?;
        Ok(())
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    type Error = anyhow::Error;

    fn present(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.view.render_into(snap, &self.hud, self.viewport, &mut self.next);
        self.flush_frame()
    }
}

/// Encode a whole frame into `out`, top-left to bottom-right.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let glyph = fb.get(x, y).unwrap_or_default();
            if style != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed runs of `next` relative to `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style: Option<CellStyle> = None;

    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if style != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// (x, y, len) runs of differing glyphs, row by row. Frames must share a size.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}
