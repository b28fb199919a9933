//! Terminal rendering. Translates a [`RenderSnapshot`] into crossterm commands;
//! no game logic lives here.
//!
//! The 800x600 playfield is scaled onto whatever grid the terminal offers:
//! row 0 is the HUD, row 1 and `rows - 2` are the border, the last row holds
//! the controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_shooter::entities::{Aabb, PowerUpKind};
use space_shooter::snapshot::{Hud, RenderSnapshot, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Grey;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_DIM: Color = Color::DarkGrey;
const C_PLAYER_SHIELD: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Red;
const C_BULLET_ENEMY: Color = Color::Yellow;
const C_POWERUP_SPREAD: Color = Color::DarkYellow;
const C_POWERUP_SHIELD: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

/// Maps playfield units onto terminal cells inside the border.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(snap: &RenderSnapshot, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Self {
            cols,
            rows,
            sx: inner_w / snap.width,
            sy: inner_h / snap.height,
        }
    }

    /// Cell under the point, or `None` when it falls outside the playfield.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.sx).floor();
        let row = (y * self.sy).floor();
        let max_col = self.cols.saturating_sub(2) as f32;
        let max_row = self.rows.saturating_sub(4) as f32;
        if col < 0.0 || row < 0.0 || col >= max_col || row >= max_row {
            return None;
        }
        Some((1 + col as u16, 2 + row as u16))
    }

    fn cells_wide(&self, rect: &Aabb) -> u16 {
        ((rect.w * self.sx).round() as u16).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols` x `rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    snap: &RenderSnapshot,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let view = Viewport::new(snap, cols, rows);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, &snap.hud, cols)?;
    draw_boss_bar(out, &snap.hud, cols)?;

    for sprite in &snap.sprites {
        draw_sprite(out, &view, sprite, &snap.hud)?;
    }

    draw_controls_hint(out, rows)?;
    if snap.game_over {
        draw_game_over(out, &snap.hud, cols, rows)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", hud.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("  High:{:>6}", hud.display_high)))?;

    let mut buffs = String::new();
    if let Some(ms) = hud.spread_remaining_ms {
        buffs.push_str(&format!("[★ SPREAD {:>2}s] ", ms / 1000 + 1));
    }
    if let Some(ms) = hud.shield_remaining_ms {
        buffs.push_str(&format!("[◆ SHIELD {:>2}s] ", ms / 1000 + 1));
    }
    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let right_len = (buffs.chars().count() + lives_str.chars().count()) as u16;

    out.queue(cursor::MoveTo(cols.saturating_sub(right_len + 1), 0))?;
    if !buffs.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_SPREAD))?;
        out.queue(Print(&buffs))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;
    Ok(())
}

/// Drawn over the top border: boss health while fighting, otherwise the
/// "boss defeated" banner.
fn draw_boss_bar<W: Write>(out: &mut W, hud: &Hud, cols: u16) -> std::io::Result<()> {
    let line = if let Some(ratio) = hud.boss_health {
        let width = 20usize;
        let filled = (ratio * width as f32).round() as usize;
        format!(
            " BOSS [{}{}] ",
            "█".repeat(filled.min(width)),
            "░".repeat(width.saturating_sub(filled))
        )
    } else if hud.boss_defeated_banner {
        match hud.next_boss_threshold {
            Some(threshold) => format!(" Boss defeated! Next wave at {threshold}. "),
            None => " Boss defeated! ".to_string(),
        }
    } else {
        return Ok(());
    };

    let col = (cols / 2).saturating_sub(line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, 1))?;
    out.queue(style::SetForegroundColor(C_BOSS))?;
    out.queue(Print(line))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    sprite: &Sprite,
    hud: &Hud,
) -> std::io::Result<()> {
    let rect = &sprite.rect;
    let Some((col, row)) = view.cell(rect.center_x(), rect.center_y()) else {
        return Ok(());
    };

    let (glyph, color): (String, Color) = match sprite.kind {
        SpriteKind::Player => {
            let color = if hud.flicker_dimmed {
                C_PLAYER_DIM
            } else if hud.shield_remaining_ms.is_some() {
                C_PLAYER_SHIELD
            } else {
                C_PLAYER
            };
            ("/▲\\".to_string(), color)
        }
        SpriteKind::Enemy => ("«▼»".to_string(), C_ENEMY),
        SpriteKind::Boss => {
            let w = view.cells_wide(rect).max(6) as usize;
            (format!("╚{}╝", "═".repeat(w - 2)), C_BOSS)
        }
        SpriteKind::PlayerBullet => ("║".to_string(), C_BULLET_PLAYER),
        SpriteKind::EnemyBullet => ("↓".to_string(), C_BULLET_ENEMY),
        SpriteKind::PowerUp(PowerUpKind::Spread) => ("★".to_string(), C_POWERUP_SPREAD),
        SpriteKind::PowerUp(PowerUpKind::Shield) => ("◆".to_string(), C_POWERUP_SHIELD),
    };

    let half = glyph.chars().count() as u16 / 2;
    let inner_right = view.cols.saturating_sub(1);
    let start = col.saturating_sub(half).max(1);
    let visible: String = glyph
        .chars()
        .take(inner_right.saturating_sub(start) as usize)
        .collect();
    out.queue(cursor::MoveTo(start, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, hud: &Hud, cols: u16, rows: u16) -> std::io::Result<()> {
    let new_best = hud.score > 0 && hud.score >= hud.high_score;
    let score_line = format!("Final Score: {:>6}", hud.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.display_high)
    } else {
        format!("High Score:  {:>6}", hud.display_high)
    };

    let lines: [(&str, Color); 3] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(3);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let tail: [(&str, Color); 3] = [
        (&score_line, Color::Green),
        (&best_line, best_color),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    for (i, (msg, color)) in tail.iter().enumerate() {
        let row = start_row + lines.len() as u16 + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
