//! Overlap-window embedding and alignment normalization
//!
//! This crate holds the deterministic half of bilingual sentence alignment:
//! building multi-granularity window embeddings for an external alignment
//! search, and turning the search's raw segments into one row per source
//! sentence.
//!
//! # Example
//!
//! ```rust
//! use fela_core::{normalize, Segment, SentenceList, Side};
//!
//! let source = SentenceList::from_strs(Side::Source, &["A.", "B."]).unwrap();
//! let target = SentenceList::from_strs(Side::Target, &["X."]).unwrap();
//!
//! let rows = normalize(&source, &target, &[Segment::new(vec![0, 1], vec![0])]).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].target.as_deref(), Some("X."));
//! assert_eq!(rows[1].target, None);
//! ```

#![warn(missing_docs)]

pub mod embed;
pub mod error;
pub mod grouped;
pub mod normalize;
pub mod segment;
pub mod sentence;
pub mod window;

pub use embed::{EmbeddingBackend, OverlapEmbedder, OverlapEmbeddings};
pub use error::{CoreError, Result};
pub use grouped::{project_groups, GroupedAlignment, GroupedText};
pub use normalize::{normalize, AlignmentNormalizer, AlignmentRow, TargetIndexPolicy};
pub use segment::{host_index, Group, Segment};
pub use sentence::{Sentence, SentenceList, Side};
pub use window::{window_text, WindowIndex, WindowPlan, BLANK_LINE, DEFAULT_MAX_WINDOW_CHARS};
