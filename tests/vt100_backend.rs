//! Virtual terminal backend for end-to-end render tests.
//!
//! Frames go out as real ANSI sequences into a `vt100::Parser`, with
//! ratatui's diff-based redraws, the way they reach a terminal.

use std::fmt::Write as _;
use std::io;

use crossterm::style::{Attribute, Color as CColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{Command, cursor, terminal};
use ratatui::backend::{Backend, ClearType, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};
use ratatui::style::{Color, Style};

pub struct VirtualTerminal {
    parser: vt100::Parser,
    size: Size,
    /// Cells written by the most recent `draw` call.
    last_draw: usize,
}

impl VirtualTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: vt100::Parser::new(height, width, 0),
            size: Size::new(width, height),
            last_draw: 0,
        }
    }

    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    /// Cells ratatui sent in the last frame. Zero when nothing changed.
    pub fn last_draw(&self) -> usize {
        self.last_draw
    }

    /// Screen position of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<Position> {
        let screen = self.parser.screen();
        screen
            .rows(0, self.size.width)
            .enumerate()
            .find_map(|(row, text)| {
                let byte = text.find(needle)?;
                let column = text[..byte].chars().count();
                Some(Position::new(column as u16, row as u16))
            })
    }

    fn emit(&mut self, command: impl Command) {
        let mut out = String::new();
        if command.write_ansi(&mut out).is_ok() {
            self.parser.process(out.as_bytes());
        }
    }
}

fn write_style(out: &mut String, style: Style) {
    let _ = SetAttribute(Attribute::Reset).write_ansi(out);
    if let Some(fg) = style.fg.and_then(to_crossterm) {
        let _ = SetForegroundColor(fg).write_ansi(out);
    }
    if let Some(bg) = style.bg.and_then(to_crossterm) {
        let _ = SetBackgroundColor(bg).write_ansi(out);
    }
}

impl Backend for VirtualTerminal {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut out = String::new();
        let mut next: Option<(u16, u16)> = None;
        let mut style: Option<Style> = None;
        let mut cells = 0;

        for (x, y, cell) in content {
            if next != Some((x, y)) {
                let _ = cursor::MoveTo(x, y).write_ansi(&mut out);
            }
            if style != Some(cell.style()) {
                write_style(&mut out, cell.style());
                style = Some(cell.style());
            }
            let _ = write!(out, "{}", cell.symbol());
            next = Some((x + 1, y));
            cells += 1;
        }

        self.parser.process(out.as_bytes());
        self.last_draw = cells;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        let (row, column) = self.parser.screen().cursor_position();
        Ok(Position::new(column, row))
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let position = position.into();
        self.emit(cursor::MoveTo(position.x, position.y));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.emit(terminal::Clear(terminal::ClearType::All));
        Ok(())
    }

    fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
        self.clear()
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize {
            columns_rows: self.size,
            pixels: Size::new(self.size.width * 8, self.size.height * 16),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn to_crossterm(color: Color) -> Option<CColor> {
    Some(match color {
        Color::Reset => return None,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(i) => CColor::AnsiValue(i),
    })
}
