//! # Scripted Front End
//!
//! A front end fed from queues instead of a device, for tests and headless
//! runs. Everything it is asked to draw is recorded for inspection.

use crate::game::{GameState, MessageLine, PlayerAction, Position};
use crate::input::{InputSource, TargetEvent};
use crate::rendering::{Color, Renderer};
use std::collections::{HashMap, VecDeque};

/// Everything drawn between two `clear` calls.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub tiles: HashMap<Position, (char, Color)>,
    pub bars: Vec<(String, i32, i32)>,
    pub status: Option<String>,
    pub log: Vec<String>,
}

impl Frame {
    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        self.tiles.get(&pos).map(|(glyph, _)| *glyph)
    }
}

/// Replays queued answers. Empty action and target queues answer `None`
/// and `Cancel`; an empty menu queue answers `None` and marks input closed.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    actions: VecDeque<PlayerAction>,
    targets: VecDeque<TargetEvent>,
    menu_answers: VecDeque<Option<usize>>,
    menus: Vec<(String, Vec<String>)>,
    statuses: Vec<String>,
    frames: Vec<Frame>,
    current: Frame,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = TargetEvent>) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn with_menu_answers(mut self, answers: impl IntoIterator<Item = Option<usize>>) -> Self {
        self.menu_answers.extend(answers);
        self
    }

    /// Headers and options of every menu shown, oldest first.
    pub fn menus_shown(&self) -> &[(String, Vec<String>)] {
        &self.menus
    }

    /// Every status line drawn, oldest first.
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Renderer for ScriptedFrontend {
    fn draw_tile(&mut self, pos: Position, glyph: char, color: Color) {
        self.current.tiles.insert(pos, (glyph, color));
    }

    fn draw_bar(&mut self, label: &str, current: i32, max: i32, _fill: Color, _back: Color) {
        self.current.bars.push((label.to_string(), current, max));
    }

    fn draw_message_log(&mut self, lines: &[MessageLine]) {
        self.current.log = lines.iter().map(|line| line.text.clone()).collect();
    }

    fn draw_status(&mut self, text: &str) {
        self.current.status = Some(text.to_string());
        self.statuses.push(text.to_string());
    }

    fn clear(&mut self) {
        self.current = Frame::default();
    }

    fn present(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
    }

    fn show_menu(&mut self, header: &str, options: &[String]) -> Option<usize> {
        self.menus.push((header.to_string(), options.to_vec()));
        self.menu_answers.pop_front().flatten()
    }
}

impl InputSource for ScriptedFrontend {
    fn next_action(&mut self, _state: &GameState) -> Option<PlayerAction> {
        self.actions.pop_front()
    }

    fn next_target_event(&mut self, _state: &GameState) -> TargetEvent {
        self.targets.pop_front().unwrap_or(TargetEvent::Cancel)
    }

    fn input_closed(&self) -> bool {
        self.menu_answers.is_empty()
    }
}
