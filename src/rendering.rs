use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{PLAY_HEIGHT, PLAY_WIDTH, TICKS_PER_SECOND};
use crate::types::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub asset: &'static str,
    pub glyph: char,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub coins: u32,
    pub speed_upgrade_cost: u32,
    pub shield_upgrade_cost: u32,
    pub shield_ticks_left: u32,
}

/// Everything the game needs from whatever displays it. Coordinates are in
/// the 800x600 play area.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, fill: char);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    fn set_hud(&mut self, hud: Hud);
    fn set_shield_indicator(&mut self, visible: bool);
    fn set_start_enabled(&mut self, enabled: bool);
    fn show_message(&mut self, message: Option<String>);
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|row| row.iter().collect()).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: the play area scaled down to character cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    /// Covers every cell the rectangle touches, at least one cell.
    pub fn fill_rect(&mut self, rect: Rect, c: char) {
        let to_col = |x: f64| x * self.width as f64 / PLAY_WIDTH;
        let to_row = |y: f64| y * self.height as f64 / PLAY_HEIGHT;
        let left = to_col(rect.position.x).floor().max(0.0) as u16;
        let top = to_row(rect.position.y).floor().max(0.0) as u16;
        let right = (to_col(rect.right()).ceil().max(0.0) as u16).max(left.saturating_add(1));
        let bottom = (to_row(rect.bottom()).ceil().max(0.0) as u16).max(top.saturating_add(1));
        for y in top..bottom.min(self.height) {
            for x in left..right.min(self.width) {
                self.set_char(x, y, c);
            }
        }
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

// --- Screen: terminal presentation of the game ---
pub const LEGEND_ROWS: u16 = 7;

pub struct Screen {
    pub grid: GameGrid,
    pub target: OutputTarget,
    height: u16,
    hud: Hud,
    shield_visible: bool,
    start_enabled: bool,
    message: Option<String>,
}

impl Screen {
    /// The play area gets every row above the controls legend.
    pub fn new(width: u16, height: u16, target: OutputTarget) -> Self {
        Screen {
            grid: GameGrid::new(width, height.saturating_sub(LEGEND_ROWS)),
            target,
            height,
            hud: Hud::default(),
            shield_visible: false,
            start_enabled: true,
            message: None,
        }
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn shield_visible(&self) -> bool {
        self.shield_visible
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hud_line(&self) -> String {
        format!("Score: {}  Coins: {}", self.hud.score, self.hud.coins)
    }

    pub fn controls_text(&self) -> Vec<String> {
        let start = if self.start_enabled { "  s : Start" } else { "  s : Start (running)" };
        vec![
            "Controls:".to_string(),
            r"  Left/Right : Move".to_string(),
            r"  Spacebar   : Fire".to_string(),
            format!("  1 : Bullet Speed ({} coins)", self.hud.speed_upgrade_cost),
            format!("  2 : Shield ({} coins)", self.hud.shield_upgrade_cost),
            start.to_string(),
            r"  x : Stop   q : Quit".to_string(),
        ]
    }

    pub fn clear_terminal(&mut self) -> io::Result<()> {
        let whole_screen = GameGrid::new(self.grid.width, self.height);
        whole_screen.clear_screen_manual(&mut self.target)?;
        self.target.flush()
    }

    pub fn present(&mut self) -> io::Result<()> {
        let width = self.grid.width;
        let play_rows = self.grid.height;

        if let OutputTarget::ScreenBuffer(sb) = &mut self.target {
            sb.clear();
        }
        self.grid.render(&mut self.target)?;

        let hud_line = self.hud_line();
        self.target.execute_move_to(MoveTo(0, 0))?;
        write!(self.target, "{}", hud_line)?;

        if self.shield_visible {
            let indicator = format!("[SHIELD {}s]", self.hud.shield_ticks_left.div_ceil(TICKS_PER_SECOND));
            let x = width.saturating_sub(indicator.len() as u16);
            self.target.execute_move_to(MoveTo(x, 0))?;
            write!(self.target, "{}", indicator)?;
        }

        let controls_text = self.controls_text();
        for (i, line) in controls_text.iter().enumerate() {
            self.target.execute_move_to(MoveTo(0, play_rows.saturating_add(i as u16)))?;
            write!(self.target, "{:<width$}", line, width = width as usize)?;
        }

        if let Some(message) = &self.message {
            let banner_x = (width / 2).saturating_sub(message.len() as u16 / 2);
            let banner_y = (play_rows / 2).saturating_sub(2);
            self.target.execute_move_to(MoveTo(banner_x, banner_y))?;
            write!(self.target, "{}", message)?;
        }

        self.target.flush()?;
        if let OutputTarget::ScreenBuffer(sb) = &self.target {
            sb.print_to_log();
        }
        Ok(())
    }
}

impl Surface for Screen {
    fn clear(&mut self) {
        self.grid.clear();
    }

    fn fill_rect(&mut self, rect: Rect, fill: char) {
        self.grid.fill_rect(rect, fill);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        self.grid.fill_rect(rect, sprite.glyph);
    }

    fn set_hud(&mut self, hud: Hud) {
        self.hud = hud;
    }

    fn set_shield_indicator(&mut self, visible: bool) {
        self.shield_visible = visible;
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
    }

    fn show_message(&mut self, message: Option<String>) {
        self.message = message;
    }
}
