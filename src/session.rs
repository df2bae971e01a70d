//! Per-session capture counters.

use crate::board::Color;
use crate::constants::CAPTURE_THRESHOLD;

/// Stones captured by each player since the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// White stones removed by Black
    pub captured_by_black: u32,
    /// Black stones removed by White
    pub captured_by_white: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Credit `stones` captured stones to `capturer`. Non-players are ignored.
    pub fn credit(&mut self, capturer: Color, stones: u32) {
        match capturer {
            Color::Black => self.captured_by_black += stones,
            Color::White => self.captured_by_white += stones,
            _ => {}
        }
    }

    /// Record the outcome of a capture, given the color of the removed stones.
    pub fn record_capture(&mut self, stones: usize, captured: Color) {
        self.credit(captured.opponent(), stones as u32);
    }

    pub fn captures(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.captured_by_black,
            Color::White => self.captured_by_white,
            _ => 0,
        }
    }

    /// The player whose captures reached the threshold, Black checked first.
    pub fn threshold_winner(&self) -> Option<Color> {
        [Color::Black, Color::White]
            .into_iter()
            .find(|&c| self.captures(c) >= CAPTURE_THRESHOLD)
    }
}
