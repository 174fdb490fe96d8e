//! # Message Log
//!
//! Bounded FIFO of wrapped, colored lines shown under the map.

use crate::config::{MESSAGE_CAPACITY, MESSAGE_WIDTH};
use crate::rendering::Color;
use crate::utils::wrap_text;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One already-wrapped line of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLine {
    pub text: String,
    pub color: Color,
}

/// Rolling log of the most recent message lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    lines: VecDeque<MessageLine>,
    width: usize,
    capacity: usize,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::with_limits(MESSAGE_WIDTH, MESSAGE_CAPACITY)
    }

    pub fn with_limits(width: usize, capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            width,
            capacity,
        }
    }

    /// Wraps `text` and appends each line, evicting the oldest lines once the
    /// log is over capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Color, MessageLog};
    ///
    /// let mut log = MessageLog::with_limits(10, 2);
    /// log.post("one two three four", Color::WHITE);
    /// let lines: Vec<_> = log.iter().map(|line| line.text.as_str()).collect();
    /// assert_eq!(lines, vec!["one two", "three four"]);
    /// ```
    pub fn post(&mut self, text: impl AsRef<str>, color: Color) {
        for line in wrap_text(text.as_ref(), self.width) {
            self.lines.push_back(MessageLine { text: line, color });
            while self.lines.len() > self.capacity {
                self.lines.pop_front();
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most recent line, if any.
    pub fn last(&self) -> Option<&MessageLine> {
        self.lines.back()
    }

    /// Whether any retained line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
