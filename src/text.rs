//! Text reveal effects for the hero title and the stat counters.

use crate::error::{FxError, FxResult};

/// Reveals markup one visible character at a time. Tags are never split:
/// a `<...>` run is emitted whole in a single step.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    cursor: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.text.len()
    }

    /// Everything revealed so far.
    pub fn shown(&self) -> &str {
        &self.text[..self.cursor]
    }

    /// Reveals the next character or tag and returns the chunk, or `None`
    /// once the whole text is shown. An unterminated tag runs to the end.
    pub fn step(&mut self) -> Option<&str> {
        let rest = &self.text[self.cursor..];
        let first = rest.chars().next()?;
        let len = if first == '<' {
            rest.find('>').map_or(rest.len(), |end| end + 1)
        } else {
            first.len_utf8()
        };
        let start = self.cursor;
        self.cursor += len;
        Some(&self.text[start..self.cursor])
    }
}

/// Counts a stat like `"50+"` up from zero over sixty frames.
#[derive(Clone, Debug)]
pub struct StatCounter {
    target: u32,
    suffix: &'static str,
    current: f64,
    increment: f64,
}

impl StatCounter {
    pub const FRAMES: f64 = 60.0;

    pub fn parse(text: &str) -> FxResult<Self> {
        let trimmed = text.trim();
        let (digits, suffix) = match trimmed.strip_suffix('+') {
            Some(digits) => (digits, "+"),
            None => (trimmed, ""),
        };
        let target: u32 = digits
            .trim()
            .parse()
            .map_err(|_| FxError::CounterText(text.to_owned()))?;
        Ok(Self {
            target,
            suffix,
            current: 0.0,
            increment: f64::from(target) / Self::FRAMES,
        })
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.current >= f64::from(self.target)
    }

    /// Advances one frame and returns the label to show.
    pub fn step(&mut self) -> String {
        if self.is_done() {
            return self.label(self.target);
        }
        self.current += self.increment;
        if self.is_done() {
            return self.label(self.target);
        }
        self.label(self.current.ceil() as u32)
    }

    fn label(&self, value: u32) -> String {
        format!("{value}{}", self.suffix)
    }
}
