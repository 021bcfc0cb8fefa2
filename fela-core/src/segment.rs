//! Raw alignment segments from the external aligner
//!
//! Groups arrive either as a bare index or as a list of indices. They are
//! ingested into [`Group`] once, and every index is converted to `usize`
//! at that point, so nothing downstream branches on shape or numeric type.

use crate::error::{CoreError, Result};
use crate::sentence::Side;
use std::fmt;

/// One sentence index or an ordered list of indices from one side
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Group {
    /// Single sentence
    One(usize),
    /// Ordered, strictly increasing list of sentences (may be empty)
    Many(Vec<usize>),
}

impl Group {
    /// Indices as a slice, regardless of variant
    pub fn indices(&self) -> &[usize] {
        match self {
            Group::One(i) => std::slice::from_ref(i),
            Group::Many(v) => v,
        }
    }

    /// First index, if any
    pub fn first(&self) -> Option<usize> {
        self.indices().first().copied()
    }

    /// Number of sentences in the group
    pub fn len(&self) -> usize {
        self.indices().len()
    }

    /// True for an empty list
    pub fn is_empty(&self) -> bool {
        self.indices().is_empty()
    }

    /// True when the group is a bare index
    pub fn is_single(&self) -> bool {
        matches!(self, Group::One(_))
    }

    /// Check strict ordering within the group
    pub fn is_strictly_increasing(&self) -> bool {
        self.indices().windows(2).all(|w| w[0] < w[1])
    }
}

impl From<usize> for Group {
    fn from(index: usize) -> Self {
        Group::One(index)
    }
}

impl From<Vec<usize>> for Group {
    fn from(indices: Vec<usize>) -> Self {
        Group::Many(indices)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::One(i) => write!(f, "{i}"),
            Group::Many(v) => {
                f.write_str("[")?;
                for (n, i) in v.iter().enumerate() {
                    if n > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{i}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A correspondence between a source group and a target group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Source sentence indices
    pub source: Group,
    /// Target sentence indices
    pub target: Group,
}

impl Segment {
    /// Create a segment from anything convertible to groups
    pub fn new(source: impl Into<Group>, target: impl Into<Group>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when both sides are bare indices
    pub fn is_one_to_one(&self) -> bool {
        self.source.is_single() && self.target.is_single()
    }

    /// Group for one side
    pub fn group(&self, side: Side) -> &Group {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    /// Fail with [`CoreError::OutOfRange`] if any index is past its side's end
    pub fn check_bounds(&self, source_len: usize, target_len: usize) -> Result<()> {
        for (side, len) in [(Side::Source, source_len), (Side::Target, target_len)] {
            if let Some(&index) = self.group(side).indices().iter().find(|&&i| i >= len) {
                return Err(CoreError::OutOfRange {
                    segment: self.to_string(),
                    side,
                    index,
                    len,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

/// Convert a raw numeric value into a host index
///
/// Accepts non-negative integers and floats with an integral value, which is
/// how numeric-library integers tend to leak into JSON.
pub fn host_index(value: f64) -> Result<usize> {
    if !value.is_finite() {
        return Err(CoreError::InvalidIndex {
            value: value.to_string(),
            reason: "not a finite number",
        });
    }
    if value < 0.0 {
        return Err(CoreError::InvalidIndex {
            value: value.to_string(),
            reason: "negative",
        });
    }
    if value.fract() != 0.0 {
        return Err(CoreError::InvalidIndex {
            value: value.to_string(),
            reason: "not an integer",
        });
    }
    if value > usize::MAX as f64 {
        return Err(CoreError::InvalidIndex {
            value: value.to_string(),
            reason: "too large",
        });
    }
    Ok(value as usize)
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{host_index, Group, Segment};
    use serde::de::{self, Deserializer, SeqAccess, Visitor};
    use serde::ser::{SerializeSeq, Serializer};
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// A single index as received over the wire
    struct HostIndex(usize);

    impl<'de> Deserialize<'de> for HostIndex {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(IndexVisitor)
        }
    }

    struct IndexVisitor;

    impl<'de> Visitor<'de> for IndexVisitor {
        type Value = HostIndex;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer sentence index")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<HostIndex, E> {
            usize::try_from(v)
                .map(HostIndex)
                .map_err(|_| E::custom(format!("index {v} does not fit in usize")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<HostIndex, E> {
            usize::try_from(v)
                .map(HostIndex)
                .map_err(|_| E::custom(format!("invalid index {v}: negative")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<HostIndex, E> {
            host_index(v).map(HostIndex).map_err(E::custom)
        }
    }

    struct GroupVisitor;

    impl<'de> Visitor<'de> for GroupVisitor {
        type Value = Group;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a sentence index or a list of sentence indices")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Group, E> {
            IndexVisitor.visit_u64(v).map(|i| Group::One(i.0))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Group, E> {
            IndexVisitor.visit_i64(v).map(|i| Group::One(i.0))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Group, E> {
            IndexVisitor.visit_f64(v).map(|i| Group::One(i.0))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Group, A::Error> {
            let mut indices = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(HostIndex(i)) = seq.next_element()? {
                indices.push(i);
            }
            Ok(Group::Many(indices))
        }
    }

    impl<'de> Deserialize<'de> for Group {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(GroupVisitor)
        }
    }

    impl Serialize for Group {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Group::One(i) => serializer.serialize_u64(*i as u64),
                Group::Many(v) => {
                    let mut seq = serializer.serialize_seq(Some(v.len()))?;
                    for i in v {
                        seq.serialize_element(i)?;
                    }
                    seq.end()
                }
            }
        }
    }

    /// Wire form: `[source, target]` or `{"source": .., "target": ..}`
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SegmentRepr {
        Pair(Group, Group),
        Named { source: Group, target: Group },
    }

    impl<'de> Deserialize<'de> for Segment {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match SegmentRepr::deserialize(deserializer)? {
                SegmentRepr::Pair(source, target) => Segment { source, target },
                SegmentRepr::Named { source, target } => Segment { source, target },
            })
        }
    }

    impl Serialize for Segment {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            (&self.source, &self.target).serialize(serializer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indices_uniform() {
        assert_eq!(Group::One(3).indices(), &[3]);
        assert_eq!(Group::Many(vec![1, 2]).indices(), &[1, 2]);
        assert!(Group::Many(vec![]).is_empty());
        assert_eq!(Group::Many(vec![]).first(), None);
    }

    #[test]
    fn test_strictly_increasing() {
        assert!(Group::Many(vec![1, 2, 5]).is_strictly_increasing());
        assert!(!Group::Many(vec![2, 2]).is_strictly_increasing());
        assert!(!Group::Many(vec![3, 1]).is_strictly_increasing());
    }

    #[test]
    fn test_segment_display() {
        let seg = Segment::new(vec![0, 1], 0);
        assert_eq!(seg.to_string(), "([0, 1], 0)");
    }

    #[test]
    fn test_check_bounds_reports_side() {
        let seg = Segment::new(5, 0);
        match seg.check_bounds(3, 1).unwrap_err() {
            CoreError::OutOfRange {
                side, index, len, ..
            } => {
                assert_eq!(side, Side::Source);
                assert_eq!(index, 5);
                assert_eq!(len, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let seg = Segment::new(0, vec![0, 4]);
        let err = seg.check_bounds(3, 2).unwrap_err();
        assert!(err.to_string().contains("target index 4"));
    }

    #[test]
    fn test_host_index() {
        assert_eq!(host_index(2.0).unwrap(), 2);
        assert!(host_index(2.5).is_err());
        assert!(host_index(-1.0).is_err());
        assert!(host_index(f64::NAN).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_ingest_mixed_shapes() {
        let segments: Vec<Segment> =
            serde_json::from_str("[[0, 0], [[1, 2], [1]], [3.0, []], {\"source\": 4, \"target\": [2, 3]}]")
                .unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(0, 0),
                Segment::new(vec![1, 2], vec![1]),
                Segment::new(3, Vec::<usize>::new()),
                Segment::new(4, vec![2, 3]),
            ]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_ingest_rejects_fractional_and_negative() {
        assert!(serde_json::from_str::<Segment>("[1.5, 0]").is_err());
        assert!(serde_json::from_str::<Segment>("[-1, 0]").is_err());
        assert!(serde_json::from_str::<Segment>("[[0, -2], 0]").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_preserves_shape() {
        let json = serde_json::to_string(&Segment::new(vec![0, 1], 2)).unwrap();
        assert_eq!(json, "[[0,1],2]");
    }
}
