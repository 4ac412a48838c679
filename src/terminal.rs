//! Crossterm front end: draws the board, feeds mouse drags to the [`Game`]
//! and owns the terminal modes for the lifetime of the session.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::Result;
use crate::game::Game;
use crate::puzzle::Direction;

const TILE_COLOR: Color = Color::Rgb {
    r: 107,
    g: 130,
    b: 114,
};
const BUTTON_COLOR: Color = Color::Rgb {
    r: 200,
    g: 180,
    b: 220,
};
const BUTTON_LABEL: &str = " Restart ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Screen geometry of the board, the restart button and the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    size: u16,
    tile_width: u16,
    tile_height: u16,
    origin_x: u16,
    origin_y: u16,
}

impl Layout {
    pub fn new(config: &Config) -> Self {
        Self {
            size: u16::try_from(config.size).unwrap_or(u16::MAX),
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            origin_x: 1,
            origin_y: 1,
        }
    }

    pub fn board(&self) -> Rect {
        Rect {
            x: self.origin_x,
            y: self.origin_y,
            width: self.size.saturating_mul(self.tile_width),
            height: self.size.saturating_mul(self.tile_height),
        }
    }

    /// Painted area of a tile; the last column (and row, when there is room)
    /// is left as a gap between neighbours.
    pub fn tile(&self, row: usize, col: usize) -> Rect {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        Rect {
            x: self
                .origin_x
                .saturating_add(col.saturating_mul(self.tile_width)),
            y: self
                .origin_y
                .saturating_add(row.saturating_mul(self.tile_height)),
            width: self.tile_width.saturating_sub(1).max(1),
            height: if self.tile_height > 1 {
                self.tile_height - 1
            } else {
                1
            },
        }
    }

    pub fn restart_button(&self) -> Rect {
        let board = self.board();
        let width = BUTTON_LABEL.len() as u16;
        Rect {
            x: board.x.saturating_add(board.width.saturating_sub(width) / 2),
            y: board.y.saturating_add(board.height).saturating_add(1),
            width,
            height: 1,
        }
    }

    pub fn status_row(&self) -> u16 {
        self.restart_button().y.saturating_add(2)
    }
}

pub fn render<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> io::Result<()> {
    queue!(out, ResetColor, Clear(ClearType::All))?;

    let grid = game.current_grid();
    for (i, row) in grid.rows().iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            draw_tile(out, layout.tile(i, j), value)?;
        }
    }

    let button = layout.restart_button();
    queue!(
        out,
        cursor::MoveTo(button.x, button.y),
        SetBackgroundColor(BUTTON_COLOR),
        SetForegroundColor(Color::Black),
        Print(BUTTON_LABEL),
        ResetColor,
    )?;

    let status = if game.is_solved() {
        "Solved! Press r or click Restart for a new board."
    } else {
        "Drag to slide a tile. Arrow keys also work. q quits."
    };
    queue!(
        out,
        cursor::MoveTo(layout.board().x, layout.status_row()),
        Print(status)
    )?;

    out.flush()
}

fn draw_tile<W: Write>(out: &mut W, rect: Rect, value: u32) -> io::Result<()> {
    let background = if value == 0 { Color::Black } else { TILE_COLOR };
    let blank = " ".repeat(usize::from(rect.width));
    let bottom = rect.y.saturating_add(rect.height);
    let label_row = rect.y.saturating_add(rect.height / 2);

    queue!(out, SetBackgroundColor(background), SetForegroundColor(Color::White))?;
    for y in rect.y..bottom {
        queue!(out, cursor::MoveTo(rect.x, y))?;
        if y == label_row && value != 0 {
            queue!(
                out,
                Print(format!("{:^width$}", value, width = usize::from(rect.width)))
            )?;
        } else {
            queue!(out, Print(&blank))?;
        }
    }
    queue!(out, ResetColor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Nothing visible changed.
    Idle,
    Redraw,
    Quit,
}

/// Maps one terminal event onto the game.
pub fn handle_event(game: &mut Game, layout: &Layout, event: &Event) -> Result<Control> {
    match *event {
        Event::Mouse(mouse) => handle_mouse(game, layout, mouse),
        Event::Key(key) => handle_key(game, key),
        Event::Resize(..) => Ok(Control::Redraw),
        _ => Ok(Control::Idle),
    }
}

fn handle_mouse(game: &mut Game, layout: &Layout, mouse: MouseEvent) -> Result<Control> {
    let (x, y) = (i32::from(mouse.column), i32::from(mouse.row));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.restart_button().contains(mouse.column, mouse.row) {
                game.request_restart()?;
                return Ok(Control::Redraw);
            }
            game.pointer_down(x, y);
            Ok(Control::Idle)
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if game.pointer_move(x, y)? > 0 {
                Ok(Control::Redraw)
            } else {
                Ok(Control::Idle)
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            game.pointer_up();
            Ok(Control::Idle)
        }
        _ => Ok(Control::Idle),
    }
}

fn handle_key(game: &mut Game, key: KeyEvent) -> Result<Control> {
    let direction = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(Control::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
        KeyCode::Char('r') => {
            game.request_restart()?;
            return Ok(Control::Redraw);
        }
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        _ => return Ok(Control::Idle),
    };
    if game.apply_move(direction)? {
        Ok(Control::Redraw)
    } else {
        Ok(Control::Idle)
    }
}

/// Raw mode, alternate screen and mouse capture, undone on drop.
pub struct TerminalGuard {
    stdout: io::Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = crossterm::execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        info!("terminal raw mode and mouse capture enabled");
        Ok(Self { stdout })
    }

    pub fn out(&mut self) -> &mut io::Stdout {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        info!("terminal restored");
    }
}

pub fn run(config: &Config) -> Result<()> {
    config.validate()?;
    let mut game = match config.seed {
        Some(seed) => Game::with_seed(config.size, seed)?,
        None => Game::new(config.size)?,
    };
    let layout = Layout::new(config);
    info!(size = config.size, seed = ?config.seed, "starting puzzle");

    let mut guard = TerminalGuard::new()?;
    render(guard.out(), &game, &layout)?;

    loop {
        let event = event::read()?;
        let control = match handle_event(&mut game, &layout, &event) {
            Ok(control) => control,
            Err(err) if err.is_fatal_to_grid() => {
                error!(error = %err, "discarding broken board");
                game.request_restart()?;
                Control::Redraw
            }
            Err(err) => return Err(err),
        };
        match control {
            Control::Quit => break,
            Control::Redraw => render(guard.out(), &game, &layout)?,
            Control::Idle => {}
        }
    }

    debug!(solved = game.is_solved(), "leaving puzzle");
    Ok(())
}
