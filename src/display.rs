/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.
///
/// The simulation runs in a pixel-space playfield; the terminal is treated
/// as a coarse raster of `CELL_W` × `CELL_H` pixel cells, and rectangles
/// are painted as runs of background-coloured blanks.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{GameStatus, Weapon, World};

// ── Pixel-to-cell projection ──────────────────────────────────────────────────

/// Pixel footprint of one terminal cell (a typical glyph is about 8×16 px).
pub const CELL_W: f32 = 8.0;
pub const CELL_H: f32 = 16.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Rgb { r: 0, g: 0, b: 255 };
const C_ZOMBIE: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const C_ITEM: Color = Color::Rgb { r: 255, g: 0, b: 255 };
const C_BAR_EMPTY: Color = Color::Rgb { r: 170, g: 0, b: 0 };
const C_BAR_FULL: Color = Color::Rgb { r: 0, g: 170, b: 0 };
const C_HUD_HP: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_XP: Color = Color::Cyan;
const C_HUD_ATTACK: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn weapon_name(weapon: Weapon) -> &'static str {
    match weapon {
        Weapon::Pistol => "Pistol",
        Weapon::Shotgun => "Shotgun",
        Weapon::Rifle => "Rifle",
    }
}

// ── Raster primitive ──────────────────────────────────────────────────────────

/// Fill a pixel-space rectangle with a solid colour, clipped to the
/// playfield.
fn fill_rect<W: Write>(
    out: &mut W,
    state: &World,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
) -> std::io::Result<()> {
    let max_col = (state.width / CELL_W) as u16;
    let max_row = (state.height / CELL_H) as u16;

    let col0 = (x.max(0.0) / CELL_W).floor() as u16;
    let col1 = (((x + w) / CELL_W).ceil().max(0.0) as u16).min(max_col);
    let row0 = (y.max(0.0) / CELL_H).floor() as u16;
    let row1 = (((y + h) / CELL_H).ceil().max(0.0) as u16).min(max_row);
    if col1 <= col0 || row1 <= row0 {
        return Ok(());
    }

    out.queue(style::SetBackgroundColor(color))?;
    let run = " ".repeat((col1 - col0) as usize);
    for row in row0..row1 {
        out.queue(cursor::MoveTo(col0, row))?;
        out.queue(Print(&run))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

/// Red-under-green health bar floating above an entity's box.
fn fill_health_bar<W: Write>(
    out: &mut W,
    state: &World,
    x: f32,
    y: f32,
    width: f32,
    health: i32,
) -> std::io::Result<()> {
    fill_rect(out, state, x, y - 10.0, width, 5.0, C_BAR_EMPTY)?;
    let filled = width * health.clamp(0, 100) as f32 / 100.0;
    fill_rect(out, state, x, y - 10.0, filled, 5.0, C_BAR_FULL)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &World) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let p = &state.player;
    fill_rect(out, state, p.x, p.y, p.width, p.height, C_PLAYER)?;
    fill_health_bar(out, state, p.x, p.y, p.width, p.health)?;

    for bullet in &state.bullets {
        let (r, g, b) = bullet.color;
        fill_rect(
            out,
            state,
            bullet.x,
            bullet.y,
            bullet.width,
            bullet.height,
            Color::Rgb { r, g, b },
        )?;
    }

    for zombie in &state.zombies {
        fill_rect(
            out,
            state,
            zombie.x,
            zombie.y,
            zombie.width,
            zombie.height,
            C_ZOMBIE,
        )?;
        fill_health_bar(out, state, zombie.x, zombie.y, zombie.width, zombie.health)?;
    }

    for item in &state.items {
        fill_rect(out, state, item.x, item.y, item.width, item.height, C_ITEM)?;
    }

    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &World) -> std::io::Result<()> {
    let p = &state.player;
    let cols = (state.width / CELL_W) as u16;

    // Health and level — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("HP {:>3}", p.health)))?;
    out.queue(cursor::MoveTo(10, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Lv {}", p.level)))?;

    // Experience bar — centre.  Fill width is 100·xp/threshold percent.
    const BAR_CELLS: u32 = 20;
    let percent = (100 * p.experience / p.experience_to_level_up).min(100);
    let filled = (BAR_CELLS * p.experience / p.experience_to_level_up).min(BAR_CELLS) as usize;
    let bar = format!(
        "XP [{}{}] {:>3}%",
        "█".repeat(filled),
        "·".repeat(BAR_CELLS as usize - filled),
        percent
    );
    let bx = (cols / 2).saturating_sub(bar.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_XP))?;
    out.queue(Print(&bar))?;

    // Weapon and attack — right
    let label = format!("{}  Attack: {}", weapon_name(p.weapon), p.attack);
    let rx = cols.saturating_sub(label.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ATTACK))?;
    out.queue(Print(&label))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &World) -> std::io::Result<()> {
    let rows = (state.height / CELL_H) as u16;
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ ↓ → / WASD : Move   CLICK : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &World) -> std::io::Result<()> {
    let p = &state.player;
    let stats_line = format!("Level {}   ·   {} XP", p.level, p.experience);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&stats_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cols = (state.width / CELL_W) as u16;
    let rows = (state.height / CELL_H) as u16;
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
