use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use zombie_arena::compute::{
    fire_bullet, init_state, spawn_item, spawn_zombie, steer_player_x, steer_player_y, tick,
};
use zombie_arena::display::{self, CELL_H, CELL_W};
use zombie_arena::entities::{GameStatus, World};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Wall-clock spawn periods — fixed, independent of the frame rate.
const ZOMBIE_SPAWN_INTERVAL: Duration = Duration::from_millis(1000);
const ITEM_SPAWN_INTERVAL: Duration = Duration::from_millis(5000);

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Frame at which `key` was last seen, if that was within the hold window.
fn held_since(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> Option<u64> {
    key_frame
        .get(key)
        .copied()
        .filter(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
}

/// Most recent live press among the alias keys of one direction.
fn direction_frame(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> Option<u64> {
    keys.iter()
        .filter_map(|k| held_since(key_frame, k, frame))
        .max()
}

/// Resolve one axis to -1 / 0 / +1.  When both directions are held the most
/// recent press wins — the axis carries a single magnitude, never a sum.
fn axis_dir(neg: Option<u64>, pos: Option<u64>) -> i8 {
    match (neg, pos) {
        (Some(n), Some(p)) => {
            if n > p {
                -1
            } else {
                1
            }
        }
        (Some(_), None) => -1,
        (None, Some(_)) => 1,
        (None, None) => 0,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "☣  ZOMBIE  ARENA  ☣";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(title))?;

    let blurb = "The horde closes in from every edge. Level up before it does.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(blurb.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(blurb))?;

    // Item legend
    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Drops (catch the falling squares):"))?;

    let drops: &[&str] = &[
        " Speed   — move faster, permanently",
        " Heal    — +20 health (max 100)",
        " Upgrade — next weapon tier",
    ];
    for (i, desc) in drops.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::Magenta))?;
        out.queue(Print("■"))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← ↑ ↓ → / WASD : Move   CLICK : Shoot"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("ENTER : Start   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu (session reset).
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame number of the last press/repeat
/// event for every key.  Each frame the four movement axes are derived from
/// the keys still "fresh" (within `HOLD_WINDOW` frames) and pushed into the
/// simulation as velocity intent; releasing (or letting the hold window
/// expire) zeroes the axis.  Mouse presses fire immediately, aimed from the
/// player toward the clicked cell.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames
///   of silence.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    // Spawn deadlines advance by their fixed period, never by frame count,
    // so the cadence survives dropped or slow frames.
    let mut next_zombie = Instant::now() + ZOMBIE_SPAWN_INTERVAL;
    let mut next_item = Instant::now() + ITEM_SPAWN_INTERVAL;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(true);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status == GameStatus::GameOver =>
                            {
                                return Ok(false);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code.clone(), frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if state.status == GameStatus::Playing {
                        // Aim at the centre of the clicked cell, in playfield px.
                        let px = column as f32 * CELL_W + CELL_W / 2.0;
                        let py = row as f32 * CELL_H + CELL_H / 2.0;
                        *state = fire_bullet(state, px, py);
                    }
                }
                _ => {}
            }
        }

        if state.status == GameStatus::Playing {
            // ── Held-key steering, most recent press winning per axis ─────────
            let left = direction_frame(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            );
            let right = direction_frame(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            );
            let up = direction_frame(
                &key_frame,
                &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                frame,
            );
            let down = direction_frame(
                &key_frame,
                &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
                frame,
            );
            *state = steer_player_x(state, axis_dir(left, right));
            *state = steer_player_y(state, axis_dir(up, down));

            // ── Wall-clock spawn timers (catch up after slow frames) ──────────
            let now = Instant::now();
            while now >= next_zombie {
                *state = spawn_zombie(state, &mut rng);
                next_zombie += ZOMBIE_SPAWN_INTERVAL;
            }
            while now >= next_item {
                *state = spawn_item(state, &mut rng);
                next_item += ITEM_SPAWN_INTERVAL;
            }

            *state = tick(state);
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                // The playfield extent is read once per session; a session
                // reset (R on the game-over overlay) lands back here and
                // rebuilds the whole state from initial values.
                let (cols, rows) = terminal::size()?;
                let mut state = init_state(cols as f32 * CELL_W, rows as f32 * CELL_H);
                if game_loop(out, &mut state, rx)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
