//! # Display Management
//!
//! Line-oriented terminal front end. Frames are composed into a character
//! buffer and written out whole; commands, menu letters and target
//! coordinates are read one line at a time.

use crate::game::{GameState, MessageLine, PlayerAction, Position};
use crate::input::{InputHandler, InputSource, TargetEvent};
use crate::rendering::{draw_world, Color, Renderer};
use log::warn;
use std::io::{self, BufRead, Write};

/// Terminal front end over any line reader and writer.
pub struct TerminalFrontend<R, W> {
    reader: R,
    writer: W,
    handler: InputHandler,
    /// Map viewport width in tiles
    pub map_width: i32,
    /// Map viewport height in tiles
    pub map_height: i32,
    buffer: Vec<Vec<char>>,
    bars: Vec<String>,
    status: String,
    log: Vec<String>,
    closed: bool,
}

impl TerminalFrontend<io::StdinLock<'static>, io::Stdout> {
    /// Front end on the process's stdin and stdout.
    pub fn stdio(map_width: i32, map_height: i32) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), map_width, map_height)
    }
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(reader: R, writer: W, map_width: i32, map_height: i32) -> Self {
        Self {
            reader,
            writer,
            handler: InputHandler::new(),
            map_width,
            map_height,
            buffer: vec![vec![' '; map_width.max(0) as usize]; map_height.max(0) as usize],
            bars: Vec::new(),
            status: String::new(),
            log: Vec::new(),
            closed: false,
        }
    }

    /// Gives back the writer, e.g. to inspect captured output.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.emit(prompt);
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.closed = true;
                None
            }
            Ok(_) => Some(line),
            Err(e) => {
                warn!("Failed to read input: {}", e);
                self.closed = true;
                None
            }
        }
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> Renderer for TerminalFrontend<R, W> {
    fn draw_tile(&mut self, pos: Position, glyph: char, _color: Color) {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.map_width || pos.y >= self.map_height {
            return;
        }
        self.buffer[pos.y as usize][pos.x as usize] = glyph;
    }

    fn draw_bar(&mut self, label: &str, current: i32, max: i32, _fill: Color, _back: Color) {
        const BAR_WIDTH: i32 = 20;
        let filled = if max > 0 {
            (current.clamp(0, max) * BAR_WIDTH / max) as usize
        } else {
            0
        };
        self.bars.push(format!(
            "{}: [{}{}] {}/{}",
            label,
            "=".repeat(filled),
            " ".repeat(BAR_WIDTH as usize - filled),
            current,
            max
        ));
    }

    fn draw_message_log(&mut self, lines: &[MessageLine]) {
        self.log = lines.iter().map(|line| line.text.clone()).collect();
    }

    fn draw_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(' ');
        }
        self.bars.clear();
        self.status.clear();
        self.log.clear();
    }

    fn present(&mut self) {
        let mut frame = String::new();
        for row in &self.buffer {
            frame.extend(row.iter());
            frame.push('\n');
        }
        for bar in &self.bars {
            frame.push_str(bar);
            frame.push('\n');
        }
        if !self.status.is_empty() {
            frame.push_str(&self.status);
            frame.push('\n');
        }
        for line in &self.log {
            frame.push_str(line);
            frame.push('\n');
        }
        self.emit(&frame);
    }

    fn show_menu(&mut self, header: &str, options: &[String]) -> Option<usize> {
        let mut text = format!("\n{}\n", header);
        for (letter, option) in ('a'..='z').zip(options) {
            text.push_str(&format!("({}) {}\n", letter, option));
        }
        self.emit(&text);
        let line = self.read_line("> ")?;
        self.handler.parse_menu_choice(&line)
    }
}

impl<R: BufRead, W: Write> InputSource for TerminalFrontend<R, W> {
    fn next_action(&mut self, state: &GameState) -> Option<PlayerAction> {
        draw_world(state, self);
        loop {
            let line = self.read_line("> ")?;
            match self.handler.parse_action(&line) {
                Some(action) => return Some(action),
                None => self.emit("Unknown command, ? for help.\n"),
            }
        }
    }

    fn next_target_event(&mut self, _state: &GameState) -> TargetEvent {
        let status = std::mem::take(&mut self.status);
        if !status.is_empty() {
            self.emit(&format!("{}\n", status));
        }
        match self.read_line("target (x y, ? x y to look, blank to cancel)> ") {
            Some(line) => self.handler.parse_target(&line),
            None => TargetEvent::Cancel,
        }
    }

    fn input_closed(&self) -> bool {
        self.closed
    }
}
