//! Combat log
//!
//! Append-only record of everything that happened during a run.

use serde::{Deserialize, Serialize};

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCategory {
    /// Attacks, skills, defeats
    Combat,
    /// Rewards, level-ups, floor progress
    Progress,
    /// Run and floor transitions
    System,
    /// Rejected actions and errors
    Warning,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub category: MessageCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory) {
        let text = text.into();
        log::debug!("[{:?}] {}", category, text);
        self.entries.push(LogEntry { text, category });
    }

    pub fn extend<I>(&mut self, lines: I, category: MessageCategory)
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines {
            self.push(line, category);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended after the first `start`
    pub fn since(&self, start: usize) -> &[LogEntry] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(|e| e.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order() {
        let mut log = CombatLog::new();
        log.push("first", MessageCategory::System);
        log.extend(vec!["second".to_string(), "third".to_string()], MessageCategory::Combat);
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["first", "second", "third"]);
        assert_eq!(log.since(1).len(), 2);
        assert!(log.since(10).is_empty());
        assert_eq!(log.last(), Some("third"));
        assert_eq!(log.entries()[1].category, MessageCategory::Combat);
    }
}
