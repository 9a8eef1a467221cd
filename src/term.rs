use crate::{TermInt, Coords};
use std::{io::{Stdout, Write, stdout}, time::{Duration, Instant}};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::ClearType;
use crossterm::event::{Event, KeyEvent, read, poll};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Cyan,
    Green,
    Red,
}

/// Output side of the console: everything the game draws goes through here.
pub trait Screen {
    fn clear(&mut self) -> Result<()>;
    fn move_to(&mut self, pos: Coords) -> Result<()>;
    fn put_char(&mut self, ch: char) -> Result<()>;
    fn write_str(&mut self, text: &str) -> Result<()>;
    fn set_color(&mut self, color: Color) -> Result<()>;
    fn set_size(&mut self, width: TermInt, height: TermInt) -> Result<()>;
    fn flush(&mut self) -> Result<()>;

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.move_to(pos)?;
        self.put_char(ch)
    }
}

/// Input side of the console.
pub trait KeySource {
    /// Waits at most `max_wait` for a key press. A zero wait never blocks.
    fn key_available(&mut self, max_wait: Duration) -> Result<bool>;

    /// Only called once `key_available` has returned true.
    fn read_key(&mut self) -> Result<KeyEvent>;
}

pub struct TermManager {
    height: TermInt,
    stdout: Stdout,
    pending_key: Option<KeyEvent>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { height: 0, stdout: stdout(), pending_key: None }
    }

    pub fn setup(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Error setting raw mode")?;

        if let Err(e) = execute!(self.stdout, cursor::Hide, cursor::DisableBlinking) {
            // Never hand the shell back in raw mode
            let _ = terminal::disable_raw_mode();
            return Err(e).context("Error hiding cursor");
        }

        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        let height = self.height;
        let cursor_res = reset_cursor(&mut self.stdout, height);
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        cursor_res?;
        println!();
        Ok(())
    }
}

/// Parks the cursor under the grid so the final score stays on screen.
fn reset_cursor<W: Write>(out: &mut W, height: TermInt) -> Result<()> {
    execute!(
        out,
        style::ResetColor,
        cursor::MoveTo(0, height),
        cursor::Show,
        cursor::EnableBlinking
    ).context("Error restoring cursor")?;
    Ok(())
}

impl Screen for TermManager {
    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn move_to(&mut self, pos: Coords) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;
        Ok(())
    }

    fn put_char(&mut self, ch: char) -> Result<()> {
        queue!(self.stdout, style::Print(ch))?;
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        queue!(self.stdout, style::Print(text))?;
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<()> {
        let color = match color {
            Color::White => style::Color::White,
            Color::Cyan => style::Color::Cyan,
            Color::Green => style::Color::Green,
            Color::Red => style::Color::Red,
        };
        queue!(self.stdout, style::SetForegroundColor(color))?;
        Ok(())
    }

    fn set_size(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        self.height = height;
        execute!(self.stdout, terminal::SetSize(width, height)).context("Error resizing terminal")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

impl KeySource for TermManager {
    fn key_available(&mut self, max_wait: Duration) -> Result<bool> {
        let deadline = Instant::now() + max_wait;

        // Resize and mouse events are dropped here so that read_key never blocks
        while self.pending_key.is_none() {
            let wait = deadline.saturating_duration_since(Instant::now());
            if !poll(wait)? {
                break;
            }
            if let Event::Key(ev) = read()? {
                self.pending_key = Some(ev);
            }
        }

        Ok(self.pending_key.is_some())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        if let Some(ev) = self.pending_key.take() {
            return Ok(ev);
        }

        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }
}
