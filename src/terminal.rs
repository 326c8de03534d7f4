//! crossterm backend for [`Renderer`].
//!
//! Every surface pixel is `CELL_W` terminal columns wide so cells look
//! roughly square. Drawing lands in a back buffer; `present` only emits the
//! pixels that changed since the previous frame.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::render::{Color, Point, Renderer, BLACK, WHITE};

pub const CELL_W: u16 = 2;
/// Rows reserved above the surface for the status line.
pub const HUD_ROWS: u16 = 1;

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    width: i32,
    height: i32,
    frame: Vec<Color>,
    last: Vec<Option<Color>>,
    hud: String,
    last_hud: String,
    needs_full: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer for a terminal of `cols x rows` characters.
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let mut renderer = Self {
            out,
            cols: 0,
            width: 0,
            height: 0,
            frame: Vec::new(),
            last: Vec::new(),
            hud: String::new(),
            last_hud: String::new(),
            needs_full: true,
        };
        renderer.resize(cols, rows);
        renderer
    }

    /// Drops both buffers and schedules a full repaint.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.width = i32::from(cols / CELL_W);
        self.height = i32::from(rows.saturating_sub(HUD_ROWS));
        let len = (self.width * self.height) as usize;
        self.frame = vec![WHITE; len];
        self.last = vec![None; len];
        self.needs_full = true;
    }

    /// Surface size in pixels.
    pub fn surface_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Sets the status line shown on the next `present`, cut to fit.
    pub fn set_hud(&mut self, text: &str) {
        self.hud = fit_to_width(text, usize::from(self.cols));
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) as usize;
        self.frame[idx] = color;
    }

    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        for y in y0.max(0)..=y1.min(self.height - 1) {
            for x in x0.max(0)..=x1.min(self.width - 1) {
                self.put(x, y, color);
            }
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) -> io::Result<()> {
        if width > 0 && height > 0 {
            let right = x.saturating_add(width - 1);
            let bottom = y.saturating_add(height - 1);
            self.fill(x, y, right, bottom, color);
        }
        Ok(())
    }

    /// Stamps a square brush of side `thickness` along the segment. The core
    /// only draws axis-aligned strokes; a diagonal fills its bounding box.
    fn draw_line(&mut self, start: Point, end: Point, color: Color, thickness: i32) -> io::Result<()> {
        let t = thickness.max(1);
        let before = t / 2;
        let after = t - 1 - before;
        self.fill(
            start.0.min(end.0).saturating_sub(before),
            start.1.min(end.1).saturating_sub(before),
            start.0.max(end.0).saturating_add(after),
            start.1.max(end.1).saturating_add(after),
            color,
        );
        Ok(())
    }

    fn clear_surface(&mut self, color: Color) -> io::Result<()> {
        self.frame.fill(color);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        if self.needs_full {
            self.out.queue(ResetColor)?;
            self.out.queue(Clear(ClearType::All))?;
        }

        if self.needs_full || self.hud != self.last_hud {
            self.out.queue(MoveTo(0, 0))?;
            self.out.queue(Clear(ClearType::CurrentLine))?;
            self.out.queue(SetForegroundColor(to_term(WHITE)))?;
            self.out.queue(SetBackgroundColor(to_term(BLACK)))?;
            self.out.queue(Print(&self.hud))?;
            self.out.queue(ResetColor)?;
            self.last_hud = self.hud.clone();
        }

        for idx in 0..self.frame.len() {
            let color = self.frame[idx];
            if !self.needs_full && self.last[idx] == Some(color) {
                continue;
            }
            self.last[idx] = Some(color);
            let x = (idx as i32 % self.width) as u16 * CELL_W;
            let y = (idx as i32 / self.width) as u16 + HUD_ROWS;
            self.out.queue(MoveTo(x, y))?;
            self.out.queue(SetBackgroundColor(to_term(color)))?;
            self.out.queue(Print(" ".repeat(usize::from(CELL_W))))?;
        }
        self.out.queue(ResetColor)?;
        self.needs_full = false;

        self.out.flush()
    }
}

/// Maps a terminal cell to the surface pixel drawn under it. The HUD rows
/// are not part of the surface.
pub fn surface_point(column: u16, row: u16) -> Option<Point> {
    let y = row.checked_sub(HUD_ROWS)?;
    Some((i32::from(column / CELL_W), i32::from(y)))
}

fn to_term(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Cuts `text` to at most `cols` display columns.
fn fit_to_width(text: &str, cols: usize) -> String {
    if UnicodeWidthStr::width(text) <= cols {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > cols {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
