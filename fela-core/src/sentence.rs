//! Sentence data model

use crate::error::{CoreError, Result};
use std::fmt;
use std::ops::Index;

/// Which text a sentence belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Text being aligned from
    Source,
    /// Text being aligned to
    Target,
}

impl Side {
    /// Lowercase name used in messages and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable sentence with its position on one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Side of the text
    pub side: Side,
    /// Zero-based position within its side
    pub index: usize,
    /// Trimmed sentence text
    pub text: String,
}

/// Ordered, non-empty list of sentences from one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceList {
    side: Side,
    texts: Vec<String>,
}

impl SentenceList {
    /// Build a list, rejecting an empty sequence
    pub fn new(side: Side, texts: Vec<String>) -> Result<Self> {
        if texts.is_empty() {
            return Err(CoreError::invalid_input(format!(
                "{side} text has no sentences"
            )));
        }
        Ok(Self { side, texts })
    }

    /// Convenience constructor from string slices
    pub fn from_strs(side: Side, texts: &[&str]) -> Result<Self> {
        Self::new(side, texts.iter().map(|t| t.to_string()).collect())
    }

    /// Side of this list
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Always false for a constructed list; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Sentence text at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(String::as_str)
    }

    /// All sentence texts in order
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Iterate sentences with their indices
    pub fn iter(&self) -> impl Iterator<Item = Sentence> + '_ {
        self.texts.iter().enumerate().map(|(index, text)| Sentence {
            side: self.side,
            index,
            text: text.clone(),
        })
    }

    /// Consume into the owned texts
    pub fn into_texts(self) -> Vec<String> {
        self.texts
    }
}

impl Index<usize> for SentenceList {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.texts[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_rejected() {
        let err = SentenceList::new(Side::Target, vec![]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
        assert!(err.to_string().contains("target"));
    }

    #[test]
    fn test_iter_positions() {
        let list = SentenceList::from_strs(Side::Source, &["A.", "B."]).unwrap();
        let sentences: Vec<Sentence> = list.iter().collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].index, 1);
        assert_eq!(sentences[1].text, "B.");
        assert_eq!(sentences[1].side, Side::Source);
        assert_eq!(&list[0], "A.");
    }
}
