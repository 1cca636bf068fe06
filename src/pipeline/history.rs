use std::collections::VecDeque;

use crate::model::TranscriptEntry;

/// Rolling window of the most recent conversation turns.
///
/// Pushing past the cap evicts the oldest entry. The context handed to
/// the assistant is always a suffix of this window.
#[derive(Debug)]
pub struct ConversationHistory {
    entries: VecDeque<TranscriptEntry>,
    cap: usize,
}

impl ConversationHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    /// Clone out the most recent `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> Vec<TranscriptEntry> {
        let start = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(start).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> Vec<TranscriptEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpeakerRole;

    fn entry(text: &str) -> TranscriptEntry {
        TranscriptEntry::new("s1", SpeakerRole::Interviewer, text)
    }

    #[test]
    fn test_push_past_cap_evicts_oldest() {
        let mut history = ConversationHistory::new(10);
        for i in 0..11 {
            history.push(entry(&format!("turn {}", i)));
        }

        assert_eq!(history.len(), 10);
        let all = history.snapshot();
        assert_eq!(all.first().unwrap().text, "turn 1");
        assert_eq!(all.last().unwrap().text, "turn 10");
    }

    #[test]
    fn test_recent_returns_suffix_oldest_first() {
        let mut history = ConversationHistory::new(10);
        for i in 0..8 {
            history.push(entry(&format!("turn {}", i)));
        }

        let recent = history.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].text, "turn 3");
        assert_eq!(recent[4].text, "turn 7");
    }

    #[test]
    fn test_recent_when_fewer_entries_than_requested() {
        let mut history = ConversationHistory::new(10);
        history.push(entry("only turn"));

        let recent = history.recent(5);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].text, "only turn");
    }

    #[test]
    fn test_empty_history() {
        let history = ConversationHistory::new(10);
        assert!(history.is_empty());
        assert!(history.recent(5).is_empty());
    }
}
