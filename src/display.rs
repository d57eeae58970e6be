/// Rendering layer — all terminal I/O lives here.
///
/// The engine hands over a list of `DrawCommand`s in field coordinates; this
/// module scales them onto the terminal grid and queues crossterm commands.
/// No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color as TermColor, Print},
    terminal,
    QueueableCommand,
};
use chicken_invaders::geometry::{Position, Rect};
use chicken_invaders::render::{Color, DrawCommand, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: TermColor = TermColor::DarkBlue;
const C_ENEMY: TermColor = TermColor::DarkYellow;
const C_APPLE: TermColor = TermColor::Red;
const C_HINT: TermColor = TermColor::DarkGrey;

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Blue => TermColor::Blue,
        Color::Green => TermColor::Green,
        Color::Red => TermColor::Red,
    }
}

/// Glyph and colour for each sprite.  Multi-cell glyphs are centred.
fn glyph(sprite: Sprite) -> (&'static str, TermColor) {
    match sprite {
        Sprite::Ship => ("/▲\\", C_SHIP),
        Sprite::Enemy => ("(◎)", C_ENEMY),
        Sprite::Apple => ("●", C_APPLE),
        Sprite::FriendlyShot => ("║", TermColor::Blue),
        Sprite::EnemyShot => ("↓", TermColor::Black),
    }
}

// ── Field ↔ grid mapping ──────────────────────────────────────────────────────

/// Maps the play field onto the terminal.  The bottom row is kept for the
/// controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field_width: f32,
    pub field_height: f32,
}

impl Viewport {
    pub fn new(term_cols: u16, term_rows: u16, field_width: f32, field_height: f32) -> Self {
        Self {
            cols: term_cols.max(1),
            rows: term_rows.saturating_sub(1).max(1),
            field_width,
            field_height,
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x / self.field_width * self.cols as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.field_height * self.rows as f32).floor() as i32
    }

    /// Centre of a terminal cell, in field coordinates.
    pub fn to_field(&self, col: u16, row: u16) -> Position {
        Position::new(
            (col as f32 + 0.5) * self.field_width / self.cols as f32,
            (row as f32 + 0.5) * self.field_height / self.rows as f32,
        )
    }

    fn in_grid(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Replay one frame of draw commands.
pub fn render<W: Write>(out: &mut W, view: &Viewport, frame: &[DrawCommand]) -> std::io::Result<()> {
    let mut background = TermColor::Reset;
    // Buttons drawn so far, so labels keep the button colour behind them.
    let mut buttons: Vec<(Rect, TermColor)> = Vec::new();

    for command in frame {
        match command {
            DrawCommand::Clear(color) => {
                background = term_color(*color);
                buttons.clear();
                out.queue(style::SetBackgroundColor(background))?;
                out.queue(terminal::Clear(terminal::ClearType::All))?;
            }
            DrawCommand::Sprite { sprite, at } => {
                let (text, color) = glyph(*sprite);
                let width = text.chars().count() as i32;
                draw_str(out, view, view.col(at.x) - width / 2, view.row(at.y), text, color, background)?;
            }
            DrawCommand::Text { text, at, color } => {
                let bg = buttons
                    .iter()
                    .rev()
                    .find(|(rect, _)| rect.contains(*at))
                    .map(|(_, c)| *c)
                    .unwrap_or(background);
                draw_str(out, view, view.col(at.x), view.row(at.y), text, term_color(*color), bg)?;
            }
            DrawCommand::Rect { rect, color } => {
                let color = term_color(*color);
                fill_rect(out, view, rect, color)?;
                buttons.push((*rect, color));
            }
            DrawCommand::Present => {
                draw_controls_hint(out, view)?;
                out.queue(style::ResetColor)?;
                out.queue(cursor::MoveTo(0, view.rows))?;
                out.flush()?;
            }
        }
    }
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// Print `text` starting at a grid cell, clipping whatever falls off the grid.
fn draw_str<W: Write>(
    out: &mut W,
    view: &Viewport,
    col: i32,
    row: i32,
    text: &str,
    fg: TermColor,
    bg: TermColor,
) -> std::io::Result<()> {
    if row < 0 || row >= view.rows as i32 {
        return Ok(());
    }
    let skip = (-col).max(0) as usize;
    let start = col.max(0);
    let room = (view.cols as i32 - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(style::SetForegroundColor(fg))?;
    out.queue(style::SetBackgroundColor(bg))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn fill_rect<W: Write>(out: &mut W, view: &Viewport, rect: &Rect, color: TermColor) -> std::io::Result<()> {
    let (c0, r0) = (view.col(rect.x), view.row(rect.y));
    let c1 = view.col(rect.x + rect.width).max(c0 + 1);
    let r1 = view.row(rect.y + rect.height).max(r0 + 1);
    out.queue(style::SetBackgroundColor(color))?;
    for row in r0..r1 {
        for col in c0..c1 {
            if view.in_grid(col, row) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(" "))?;
            }
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, view.rows))?;
    out.queue(style::SetBackgroundColor(TermColor::Reset))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Click : Restart   Q : Quit"))?;
    Ok(())
}
