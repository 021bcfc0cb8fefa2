//! Alignment search boundary
//!
//! The statistical search runs outside this workspace. [`AlignmentSearch`] is
//! the seam; [`HttpAlignmentSearch`] talks to a search sidecar and
//! [`DiagonalSearch`] is a length-proportional baseline for offline runs.

use crate::config::SearchParams;
use crate::error::{EngineError, Result};
use crate::transport::{HttpSettings, JsonClient};
use fela_core::{Group, OverlapEmbeddings, Segment, SentenceList};
use serde::{Deserialize, Serialize};

/// Everything the search needs for one document pair
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    /// Source sentences
    pub source: &'a SentenceList,
    /// Target sentences
    pub target: &'a SentenceList,
    /// Source overlap embeddings and lengths
    pub source_embeddings: &'a OverlapEmbeddings,
    /// Target overlap embeddings and lengths
    pub target_embeddings: &'a OverlapEmbeddings,
    /// Search parameters
    pub params: &'a SearchParams,
}

/// Produces raw segments for a document pair
pub trait AlignmentSearch: Send + Sync {
    /// Run the search
    ///
    /// Segments are expected in source order; indices are validated later by
    /// the normalizer.
    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Segment>>;

    /// Human-readable name for logs
    fn name(&self) -> &str;
}

impl<T: AlignmentSearch + ?Sized> AlignmentSearch for std::sync::Arc<T> {
    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Segment>> {
        (**self).search(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[derive(Serialize)]
struct SidePayload<'a> {
    sentences: &'a [String],
    embeddings: Vec<Vec<Vec<f32>>>,
    lengths: Vec<Vec<usize>>,
}

impl<'a> SidePayload<'a> {
    fn new(sentences: &'a SentenceList, embeddings: &OverlapEmbeddings) -> Self {
        Self {
            sentences: sentences.texts(),
            embeddings: embeddings
                .vectors()
                .outer_iter()
                .map(|layer| layer.outer_iter().map(|row| row.to_vec()).collect())
                .collect(),
            lengths: embeddings
                .lengths()
                .outer_iter()
                .map(|row| row.to_vec())
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct SearchPayload<'a> {
    source: SidePayload<'a>,
    target: SidePayload<'a>,
    params: &'a SearchParams,
}

#[derive(Deserialize)]
struct SearchReply {
    alignments: Vec<Segment>,
}

/// Client for a search sidecar: `POST {endpoint}/search` → `{"alignments": [...]}`
#[derive(Debug, Clone)]
pub struct HttpAlignmentSearch {
    client: JsonClient,
    url: String,
}

impl HttpAlignmentSearch {
    /// Connect to the sidecar described by `settings`
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = JsonClient::new(settings).map_err(|e| EngineError::backend("search", e))?;
        Ok(Self {
            client,
            url: settings.url("search"),
        })
    }

    /// Full URL requests are sent to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AlignmentSearch for HttpAlignmentSearch {
    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Segment>> {
        let payload = SearchPayload {
            source: SidePayload::new(request.source, request.source_embeddings),
            target: SidePayload::new(request.target, request.target_embeddings),
            params: request.params,
        };
        let reply: SearchReply = self
            .client
            .post(&self.url, &payload)
            .map_err(|e| EngineError::backend("search", e))?;
        Ok(reply.alignments)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Baseline that maps source sentence `i` to target `i * m / n`
///
/// Consecutive source sentences landing on the same target are grouped into
/// one segment; targets that nothing lands on are left out. Ignores the
/// embeddings entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagonalSearch;

impl AlignmentSearch for DiagonalSearch {
    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Segment>> {
        let (n, m) = (request.source.len(), request.target.len());
        let mut segments: Vec<Segment> = Vec::new();

        for i in 0..n {
            let j = i * m / n;
            match segments.last_mut() {
                Some(last) if last.target == Group::One(j) => {
                    let mut indices = last.source.indices().to_vec();
                    indices.push(i);
                    last.source = Group::Many(indices);
                }
                _ => segments.push(Segment::new(i, j)),
            }
        }
        Ok(segments)
    }

    fn name(&self) -> &str {
        "diagonal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HashingEmbedder;
    use fela_core::{OverlapEmbedder, Side};

    fn run_diagonal(src: &[&str], tgt: &[&str]) -> Vec<Segment> {
        let source = SentenceList::from_strs(Side::Source, src).unwrap();
        let target = SentenceList::from_strs(Side::Target, tgt).unwrap();
        let embedder = OverlapEmbedder::new(HashingEmbedder::new(8).unwrap(), 2);
        let source_embeddings = embedder.transform(&source).unwrap();
        let target_embeddings = embedder.transform(&target).unwrap();
        let params = SearchParams::default();
        DiagonalSearch
            .search(&SearchRequest {
                source: &source,
                target: &target,
                source_embeddings: &source_embeddings,
                target_embeddings: &target_embeddings,
                params: &params,
            })
            .unwrap()
    }

    #[test]
    fn test_diagonal_equal_lengths() {
        assert_eq!(
            run_diagonal(&["A.", "B."], &["X.", "Y."]),
            vec![Segment::new(0, 0), Segment::new(1, 1)]
        );
    }

    #[test]
    fn test_diagonal_groups_many_to_one() {
        assert_eq!(
            run_diagonal(&["A.", "B.", "C.", "D."], &["X.", "Y."]),
            vec![Segment::new(vec![0, 1], 0), Segment::new(vec![2, 3], 1)]
        );
    }

    #[test]
    fn test_diagonal_skips_unused_targets() {
        assert_eq!(
            run_diagonal(&["A.", "B."], &["X.", "Y.", "Z.", "W."]),
            vec![Segment::new(0, 0), Segment::new(1, 2)]
        );
    }

    #[test]
    fn test_payload_layout() {
        let source = SentenceList::from_strs(Side::Source, &["A.", "B."]).unwrap();
        let embeddings = OverlapEmbedder::new(HashingEmbedder::new(4).unwrap(), 2)
            .transform(&source)
            .unwrap();
        let payload = serde_json::to_value(SidePayload::new(&source, &embeddings)).unwrap();

        assert_eq!(payload["sentences"], serde_json::json!(["A.", "B."]));
        assert_eq!(payload["embeddings"].as_array().unwrap().len(), 2);
        assert_eq!(payload["embeddings"][0].as_array().unwrap().len(), 2);
        assert_eq!(payload["embeddings"][0][0].as_array().unwrap().len(), 4);
        assert_eq!(payload["lengths"], serde_json::json!([[2, 2], [5, 0]]));
    }

    #[test]
    fn test_reply_accepts_mixed_groups() {
        let reply: SearchReply =
            serde_json::from_str(r#"{"alignments": [[0, 0], [[1, 2], 1.0]]}"#).unwrap();
        assert_eq!(
            reply.alignments,
            vec![Segment::new(0, 0), Segment::new(vec![1, 2], 1)]
        );
    }
}
