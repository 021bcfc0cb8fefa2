//! Segment-level view of an alignment
//!
//! Keeps one entry per raw segment instead of one row per source sentence.
//! Used by job-style consumers that want the grouping itself.

use crate::error::Result;
use crate::segment::{Group, Segment};
use crate::sentence::SentenceList;

/// Texts of one group: a bare string for a single index, a list otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum GroupedText {
    /// Text of a bare index
    One(String),
    /// Texts of a list group, in order
    Many(Vec<String>),
}

impl GroupedText {
    fn from_group(group: &Group, sentences: &SentenceList) -> Self {
        match group {
            Group::One(i) => GroupedText::One(sentences[*i].to_string()),
            Group::Many(v) => GroupedText::Many(v.iter().map(|&i| sentences[i].to_string()).collect()),
        }
    }

    /// All texts joined with a single space
    pub fn joined(&self) -> String {
        match self {
            GroupedText::One(s) => s.clone(),
            GroupedText::Many(v) => v.join(" "),
        }
    }
}

/// Source and target texts of one segment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupedAlignment {
    /// Source side texts
    pub source: GroupedText,
    /// Target side texts
    pub target: GroupedText,
}

/// Resolve every segment to its texts; fails on out-of-range indices
pub fn project_groups(
    segments: &[Segment],
    source: &SentenceList,
    target: &SentenceList,
) -> Result<Vec<GroupedAlignment>> {
    for segment in segments {
        segment.check_bounds(source.len(), target.len())?;
    }
    Ok(segments
        .iter()
        .map(|segment| GroupedAlignment {
            source: GroupedText::from_group(&segment.source, source),
            target: GroupedText::from_group(&segment.target, target),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::sentence::Side;

    #[test]
    fn test_project_keeps_shape() {
        let source = SentenceList::from_strs(Side::Source, &["A.", "B.", "C."]).unwrap();
        let target = SentenceList::from_strs(Side::Target, &["X.", "Y."]).unwrap();
        let groups = project_groups(
            &[Segment::new(0, 0), Segment::new(vec![1, 2], vec![1])],
            &source,
            &target,
        )
        .unwrap();

        assert_eq!(groups[0].source, GroupedText::One("A.".to_string()));
        assert_eq!(
            groups[1].source,
            GroupedText::Many(vec!["B.".to_string(), "C.".to_string()])
        );
        assert_eq!(groups[1].source.joined(), "B. C.");
        assert_eq!(groups[1].target, GroupedText::Many(vec!["Y.".to_string()]));
    }

    #[test]
    fn test_project_out_of_range() {
        let source = SentenceList::from_strs(Side::Source, &["A."]).unwrap();
        let target = SentenceList::from_strs(Side::Target, &["X."]).unwrap();
        let err = project_groups(&[Segment::new(0, 3)], &source, &target).unwrap_err();
        assert!(matches!(err, CoreError::OutOfRange { .. }));
    }
}
