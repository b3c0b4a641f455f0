//! Bounded, human-readable game log

use serde::Serialize;

use crate::core::calendar::Calendar;
use crate::core::history::BoundedSeries;

/// Most recent log lines, each stamped with the quarter it happened in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameLog {
    lines: BoundedSeries<String>,
}

impl GameLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: BoundedSeries::new(capacity),
        }
    }

    /// Record a message and return the stamped line
    pub fn push(&mut self, calendar: Calendar, message: impl AsRef<str>) -> String {
        let line = format!("{}: {}", calendar, message.as_ref());
        self.lines.push(line.clone());
        line
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &String> + ExactSizeIterator {
        self.lines.iter()
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.latest().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_stamped() {
        let mut log = GameLog::new(10);
        let line = log.push(Calendar::new(2025), "Game started.");
        assert_eq!(line, "2025 Q1: Game started.");
        assert_eq!(log.latest(), Some("2025 Q1: Game started."));
    }

    #[test]
    fn test_log_keeps_last_lines() {
        let mut log = GameLog::new(10);
        for i in 0..25 {
            log.push(Calendar::new(2025), format!("entry {}", i));
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.lines().next().map(String::as_str), Some("2025 Q1: entry 15"));
    }
}
