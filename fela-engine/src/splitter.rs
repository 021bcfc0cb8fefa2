//! Sentence splitting
//!
//! Rule-based splitter: a sentence ends at `.`, `!` or `?` when the next
//! non-space character is an uppercase ASCII letter.

use fela_core::{CoreError, SentenceList, Side};
use regex::Regex;
use std::sync::OnceLock;

/// How raw text is cut into sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Terminal punctuation followed by whitespace and a capital letter
    #[default]
    Punctuation,
    /// One sentence per non-blank line (pre-split input)
    Lines,
}

impl SplitMode {
    /// Stable name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Punctuation => "punctuation",
            SplitMode::Lines => "lines",
        }
    }

    /// Parse a configuration name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "punctuation" => Some(SplitMode::Punctuation),
            "lines" => Some(SplitMode::Lines),
            _ => None,
        }
    }
}

fn boundary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?]\s+[A-Z]").expect("boundary pattern is valid"))
}

/// Deterministic sentence splitter
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter {
    mode: SplitMode,
}

impl SentenceSplitter {
    /// Splitter for the given mode
    pub fn new(mode: SplitMode) -> Self {
        Self { mode }
    }

    /// Mode in use
    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    /// Split into trimmed, non-empty sentences
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self.mode {
            SplitMode::Punctuation => split_punctuation(text.trim()),
            SplitMode::Lines => text
                .lines()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Split one side of the input, rejecting text with no sentences
    pub fn split_side(&self, side: Side, text: &str) -> Result<SentenceList, CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::invalid_input(format!("{side} text is empty")));
        }
        let sentences = self.split(text).into_iter().map(String::from).collect();
        SentenceList::new(side, sentences)
    }
}

fn split_punctuation(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in boundary_pattern().find_iter(text) {
        // Terminator is one ASCII byte; the capital letter opens the next sentence
        let end = m.start() + 1;
        let next = m.end() - 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = next;
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}

/// Split with the default punctuation rule
pub fn split_sentences(text: &str) -> Vec<&str> {
    SentenceSplitter::default().split(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_split() {
        assert_eq!(
            split_sentences("Hello world. This is a test! Is it? Yes."),
            vec!["Hello world.", "This is a test!", "Is it?", "Yes."]
        );
    }

    #[test]
    fn test_no_split_before_lowercase() {
        assert_eq!(
            split_sentences("It costs 3.5 dollars. e.g. this stays. Next one."),
            vec!["It costs 3.5 dollars. e.g. this stays.", "Next one."]
        );
    }

    #[test]
    fn test_no_split_without_whitespace() {
        assert_eq!(split_sentences("Version 1.Two words."), vec!["Version 1.Two words."]);
    }

    #[test]
    fn test_multiple_spaces_and_newlines() {
        assert_eq!(
            split_sentences("  First one.\n\n   Second one.  "),
            vec!["First one.", "Second one."]
        );
    }

    #[test]
    fn test_non_ascii_text_is_one_sentence() {
        assert_eq!(
            split_sentences("日本語の文です。次の文です。"),
            vec!["日本語の文です。次の文です。"]
        );
    }

    #[test]
    fn test_lines_mode() {
        let splitter = SentenceSplitter::new(SplitMode::Lines);
        assert_eq!(
            splitter.split("one line. Still one\n\n  second line \n"),
            vec!["one line. Still one", "second line"]
        );
    }

    #[test]
    fn test_split_side_rejects_blank() {
        let err = SentenceSplitter::default()
            .split_side(Side::Source, "   \n ")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(SplitMode::parse("lines"), Some(SplitMode::Lines));
        assert_eq!(SplitMode::parse(SplitMode::Punctuation.as_str()), Some(SplitMode::Punctuation));
        assert_eq!(SplitMode::parse("regex"), None);
    }

    proptest! {
        #[test]
        fn never_returns_empty_pieces(text in "[A-Za-z .!?\n]{0,80}") {
            for piece in split_sentences(&text) {
                prop_assert!(!piece.is_empty());
                prop_assert_eq!(piece, piece.trim());
            }
        }

        #[test]
        fn split_is_deterministic(text in "[A-Za-z .!?]{0,80}") {
            prop_assert_eq!(split_sentences(&text), split_sentences(&text));
        }
    }
}
