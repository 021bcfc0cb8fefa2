//! Alignment-result normalization
//!
//! Converts raw, possibly gapped and many-to-many segments into exactly one
//! row per source sentence, in source order.
//!
//! Rules, applied with a single output cursor:
//! 1. Before each source index of a segment, emit null-target rows for every
//!    skipped source sentence.
//! 2. Emit one row per source index of the segment. Only the first emitted
//!    row of the segment carries the target text (the first target index);
//!    later rows of the same segment get a null target.
//! 3. After the last segment, emit null-target rows for the remaining source
//!    sentences.

use crate::error::{CoreError, Result};
use crate::segment::Segment;
use crate::sentence::{SentenceList, Side};

/// How the `target_idx` field of a row is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetIndexPolicy {
    /// `target_idx` mirrors the row position (wire-compatible behaviour)
    #[default]
    RowPosition,
    /// `target_idx` is the index of the assigned target sentence, or null
    TargetSequence,
}

impl TargetIndexPolicy {
    /// Stable name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetIndexPolicy::RowPosition => "row_position",
            TargetIndexPolicy::TargetSequence => "target_sequence",
        }
    }

    /// Parse a configuration name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "row_position" | "row-position" => Some(TargetIndexPolicy::RowPosition),
            "target_sequence" | "target-sequence" => Some(TargetIndexPolicy::TargetSequence),
            _ => None,
        }
    }
}

/// One output row per source sentence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentRow {
    /// Source sentence text
    pub source: String,
    /// Assigned target text, `None` when nothing is attached to this row
    pub target: Option<String>,
    /// Row position, equal to the source sentence index
    pub source_idx: usize,
    /// See [`TargetIndexPolicy`]
    pub target_idx: Option<usize>,
}

/// Stateless normalizer; holds only the `target_idx` policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentNormalizer {
    policy: TargetIndexPolicy,
}

impl AlignmentNormalizer {
    /// Normalizer with the given policy
    pub fn new(policy: TargetIndexPolicy) -> Self {
        Self { policy }
    }

    /// Policy in use
    pub fn policy(&self) -> TargetIndexPolicy {
        self.policy
    }

    /// Produce exactly `source.len()` rows from `segments`
    ///
    /// All segments are validated before any row is built, so an error never
    /// comes with partial output.
    pub fn normalize(
        &self,
        source: &SentenceList,
        target: &SentenceList,
        segments: &[Segment],
    ) -> Result<Vec<AlignmentRow>> {
        self.validate(source.len(), target.len(), segments)?;

        let mut builder = RowBuilder::new(source, target, self.policy);
        for segment in segments {
            let mut target_pending = segment.target.first();
            for &index in segment.source.indices() {
                builder.fill_gaps(index);
                builder.push(target_pending.take());
            }
        }
        builder.fill_gaps(source.len());

        let rows = builder.finish();
        debug_assert_eq!(rows.len(), source.len());
        Ok(rows)
    }

    fn validate(&self, source_len: usize, target_len: usize, segments: &[Segment]) -> Result<()> {
        let mut cursor = 0usize;
        for segment in segments {
            segment.check_bounds(source_len, target_len)?;
            for side in [Side::Source, Side::Target] {
                if !segment.group(side).is_strictly_increasing() {
                    return Err(CoreError::GroupOrder {
                        segment: segment.to_string(),
                        side,
                    });
                }
            }

            let (Some(first), Some(&last)) =
                (segment.source.first(), segment.source.indices().last())
            else {
                log::debug!("skipping target-only segment {segment}");
                continue;
            };
            if first < cursor {
                return Err(CoreError::SegmentOrder {
                    segment: segment.to_string(),
                    index: first,
                    cursor,
                });
            }
            cursor = last + 1;
        }
        Ok(())
    }
}

/// Cursor-driven row emitter
struct RowBuilder<'a> {
    source: &'a SentenceList,
    target: &'a SentenceList,
    policy: TargetIndexPolicy,
    rows: Vec<AlignmentRow>,
}

impl<'a> RowBuilder<'a> {
    fn new(source: &'a SentenceList, target: &'a SentenceList, policy: TargetIndexPolicy) -> Self {
        Self {
            source,
            target,
            policy,
            rows: Vec::with_capacity(source.len()),
        }
    }

    fn cursor(&self) -> usize {
        self.rows.len()
    }

    fn fill_gaps(&mut self, until: usize) {
        while self.cursor() < until {
            self.push(None);
        }
    }

    fn push(&mut self, target_index: Option<usize>) {
        let position = self.cursor();
        let target_idx = match self.policy {
            TargetIndexPolicy::RowPosition => Some(position),
            TargetIndexPolicy::TargetSequence => target_index,
        };
        self.rows.push(AlignmentRow {
            source: self.source[position].to_string(),
            target: target_index.map(|t| self.target[t].to_string()),
            source_idx: position,
            target_idx,
        });
    }

    fn finish(self) -> Vec<AlignmentRow> {
        self.rows
    }
}

/// Normalize with the default policy
pub fn normalize(
    source: &SentenceList,
    target: &SentenceList,
    segments: &[Segment],
) -> Result<Vec<AlignmentRow>> {
    AlignmentNormalizer::default().normalize(source, target, segments)
}
