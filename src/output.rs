//! Operator-facing output sinks.
//!
//! Three channels, after the admin-CLI convention the command grew up in:
//! plain `log` lines, `Success:` lines, and `Error:` lines on stderr.

use colored::Colorize;
use std::sync::Mutex;

pub trait Output {
    fn log(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn log(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "Success:".green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Log(String),
    Success(String),
    Error(String),
}

/// Captures lines in order. Used by tests and by callers embedding the
/// handler.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    lines: Mutex<Vec<Line>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, line: Line) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Output for RecordingOutput {
    fn log(&self, message: &str) {
        self.push(Line::Log(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Line::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Line::Error(message.to_string()));
    }
}
