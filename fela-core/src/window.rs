//! Overlap window planning
//!
//! A [`WindowPlan`] is the one ordered list of window indices used both to
//! build the embedding batch and to place the returned vectors back into the
//! tensor. Batch position `i` is always `plan[i]`.

use crate::error::{CoreError, Result};
use crate::sentence::SentenceList;

/// Placeholder embedded in place of an empty sentence
pub const BLANK_LINE: &str = "BLANK_LINE";

/// Default cap on window text length, in characters
pub const DEFAULT_MAX_WINDOW_CHARS: usize = 10_000;

/// Position of one window: `length` consecutive sentences from `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowIndex {
    /// Number of sentences in the window (1-based)
    pub length: usize,
    /// Index of the first sentence
    pub start: usize,
}

impl WindowIndex {
    /// Tensor layer for this window (`length - 1`)
    pub fn layer(&self) -> usize {
        self.length - 1
    }

    /// One past the last sentence index
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Deterministic enumeration of every window that fits in `n` sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPlan {
    sentence_count: usize,
    num_overlaps: usize,
    windows: Vec<WindowIndex>,
}

impl WindowPlan {
    /// Plan windows for `sentence_count` sentences up to `num_overlaps` long
    pub fn new(sentence_count: usize, num_overlaps: usize) -> Result<Self> {
        if sentence_count == 0 {
            return Err(CoreError::invalid_input("cannot plan windows for zero sentences"));
        }
        if num_overlaps == 0 {
            return Err(CoreError::invalid_input("num_overlaps must be at least 1"));
        }

        let mut windows = Vec::with_capacity(Self::expected_len(sentence_count, num_overlaps));
        for length in 1..=num_overlaps {
            if length > sentence_count {
                break;
            }
            for start in 0..=sentence_count - length {
                windows.push(WindowIndex { length, start });
            }
        }

        Ok(Self {
            sentence_count,
            num_overlaps,
            windows,
        })
    }

    /// Closed-form window count: `sum(n - k + 1)` for `k <= min(n, num_overlaps)`
    pub fn expected_len(sentence_count: usize, num_overlaps: usize) -> usize {
        (1..=num_overlaps.min(sentence_count))
            .map(|k| sentence_count - k + 1)
            .sum()
    }

    /// Number of windows of a given length
    pub fn count_for_length(&self, length: usize) -> usize {
        if length == 0 || length > self.num_overlaps || length > self.sentence_count {
            0
        } else {
            self.sentence_count - length + 1
        }
    }

    /// Whether `(length, start)` names a planned window
    pub fn contains(&self, length: usize, start: usize) -> bool {
        length >= 1
            && length <= self.num_overlaps
            && length <= self.sentence_count
            && start + length <= self.sentence_count
    }

    /// Window at batch position `i`
    pub fn get(&self, i: usize) -> Option<WindowIndex> {
        self.windows.get(i).copied()
    }

    /// All windows in batch order
    pub fn windows(&self) -> &[WindowIndex] {
        &self.windows
    }

    /// Total number of windows in the batch
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// True when nothing is planned (never for a constructed plan)
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Sentence count the plan was built for
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Maximum window length
    pub fn num_overlaps(&self) -> usize {
        self.num_overlaps
    }

    /// Build the window texts in batch order
    pub fn texts(&self, sentences: &SentenceList, max_chars: usize) -> Result<Vec<String>> {
        if sentences.len() != self.sentence_count {
            return Err(CoreError::shape(
                format!("{} sentences", self.sentence_count),
                format!("{} sentences", sentences.len()),
            ));
        }
        Ok(self
            .windows
            .iter()
            .map(|w| window_text(&sentences.texts()[w.start..w.end()], max_chars))
            .collect())
    }
}

/// Join sentences with a single space, applying the blank and length rules
pub fn window_text(sentences: &[String], max_chars: usize) -> String {
    let joined = sentences
        .iter()
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                BLANK_LINE
            } else {
                trimmed
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(joined, max_chars)
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_pos, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_pos);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Side;

    #[test]
    fn test_plan_order() {
        let plan = WindowPlan::new(3, 2).unwrap();
        let expected = vec![
            WindowIndex { length: 1, start: 0 },
            WindowIndex { length: 1, start: 1 },
            WindowIndex { length: 1, start: 2 },
            WindowIndex { length: 2, start: 0 },
            WindowIndex { length: 2, start: 1 },
        ];
        assert_eq!(plan.windows(), expected.as_slice());
    }

    #[test]
    fn test_plan_longer_than_text() {
        let plan = WindowPlan::new(2, 4).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.count_for_length(2), 1);
        assert_eq!(plan.count_for_length(3), 0);
        assert_eq!(plan.count_for_length(4), 0);
        assert!(!plan.contains(3, 0));
    }

    #[test]
    fn test_plan_rejects_zero() {
        assert!(WindowPlan::new(0, 2).is_err());
        assert!(WindowPlan::new(3, 0).is_err());
    }

    #[test]
    fn test_window_texts() {
        let sentences = SentenceList::from_strs(Side::Source, &["A.", " B. ", "C."]).unwrap();
        let plan = WindowPlan::new(3, 3).unwrap();
        let texts = plan.texts(&sentences, DEFAULT_MAX_WINDOW_CHARS).unwrap();
        assert_eq!(
            texts,
            vec!["A.", "B.", "C.", "A. B.", "B. C.", "A. B. C."]
        );
    }

    #[test]
    fn test_blank_sentence_placeholder() {
        let text = window_text(&["Hi.".to_string(), "   ".to_string()], 100);
        assert_eq!(text, "Hi. BLANK_LINE");
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let text = window_text(&["日本語のテキスト".to_string()], 3);
        assert_eq!(text, "日本語");
    }
}
