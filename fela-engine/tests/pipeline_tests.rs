//! Pipeline tests with in-process backends

use fela_engine::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Search returning a fixed segment list and recording what it was given
struct ScriptedSearch {
    segments: Vec<Segment>,
    seen: Mutex<Option<(Vec<usize>, Vec<usize>, usize)>>,
}

impl ScriptedSearch {
    fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            seen: Mutex::new(None),
        }
    }
}

impl AlignmentSearch for ScriptedSearch {
    fn search(&self, request: &SearchRequest<'_>) -> fela_engine::Result<Vec<Segment>> {
        *self.seen.lock().unwrap() = Some((
            request.source_embeddings.vectors().shape().to_vec(),
            request.target_embeddings.vectors().shape().to_vec(),
            request.params.max_align,
        ));
        Ok(self.segments.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct SlowSearch;

impl AlignmentSearch for SlowSearch {
    fn search(&self, _request: &SearchRequest<'_>) -> fela_engine::Result<Vec<Segment>> {
        thread::sleep(Duration::from_millis(400));
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

struct CountingEmbedder {
    calls: AtomicUsize,
}

impl EmbeddingBackend for CountingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> fela_core::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| vec![t.len() as f32; 3]).collect())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_spec_style_many_to_one() {
    let search = Arc::new(ScriptedSearch::new(vec![Segment::new(vec![0, 1], vec![0])]));
    let pipeline = Pipeline::builder()
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(search.clone())
        .build()
        .unwrap();

    let out = pipeline.run("A. B.", "X.").unwrap();
    assert_eq!(out.rows.len(), 2);
    assert_eq!(out.rows[0].source, "A.");
    assert_eq!(out.rows[0].target.as_deref(), Some("X."));
    assert_eq!(out.rows[1].target, None);
    assert_eq!(out.rows[1].source_idx, 1);

    let (src_shape, tgt_shape, max_align) = search.seen.lock().unwrap().clone().unwrap();
    assert_eq!(src_shape, vec![4, 2, hashing_dim()]);
    assert_eq!(tgt_shape, vec![4, 1, hashing_dim()]);
    assert_eq!(max_align, 5);
}

fn hashing_dim() -> usize {
    fela_engine::backend::hashing::DEFAULT_DIMENSION
}

#[test]
fn test_one_embedding_call_per_side() {
    let embedder = Arc::new(CountingEmbedder {
        calls: AtomicUsize::new(0),
    });
    let pipeline = Pipeline::builder()
        .embedding(embedder.clone())
        .search(Arc::new(DiagonalSearch))
        .build()
        .unwrap();

    pipeline
        .run("One. Two. Three. Four.", "Eins. Zwei. Drei.")
        .unwrap();
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_out_of_range_segment_fails_without_rows() {
    let pipeline = Pipeline::builder()
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(Arc::new(ScriptedSearch::new(vec![Segment::new(5, 0)])))
        .build()
        .unwrap();

    let err = pipeline.run("A. B. C.", "X.").unwrap_err();
    assert!(matches!(
        err,
        EngineError::Core(CoreError::OutOfRange {
            side: Side::Source,
            index: 5,
            ..
        })
    ));
}

#[test]
fn test_target_sequence_policy() {
    let config = EngineConfig {
        target_index: TargetIndexPolicy::TargetSequence,
        ..EngineConfig::default()
    };
    let pipeline = Pipeline::builder()
        .config(config)
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(Arc::new(ScriptedSearch::new(vec![
            Segment::new(0, 1),
            Segment::new(2, 0),
        ])))
        .build()
        .unwrap();

    let out = pipeline.run("A. B. C.", "X. Y.").unwrap();
    let idx: Vec<_> = out.rows.iter().map(|r| r.target_idx).collect();
    assert_eq!(idx, vec![Some(1), None, Some(0)]);
}

#[test]
fn test_lines_split_mode() {
    let config = EngineConfig {
        split_mode: SplitMode::Lines,
        ..EngineConfig::default()
    };
    let pipeline = Pipeline::builder()
        .config(config)
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(Arc::new(DiagonalSearch))
        .build()
        .unwrap();

    let out = pipeline.run("first line\nsecond line", "erste\nzweite").unwrap();
    assert_eq!(out.source.texts(), &["first line", "second line"]);
    assert_eq!(out.rows[1].target.as_deref(), Some("zweite"));
}

#[test]
fn test_deadline_exceeded_returns_timeout() {
    let pipeline = Pipeline::builder()
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(Arc::new(SlowSearch))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = pipeline.run_with_deadline("A.", "X.").unwrap_err();
    assert!(matches!(err, EngineError::Timeout { .. }));
}

#[test]
fn test_deadline_met_returns_rows() {
    let pipeline = Pipeline::builder()
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(Arc::new(DiagonalSearch))
        .build()
        .unwrap();

    let out = pipeline
        .run_with_timeout("A. B.", "X. Y.", Duration::from_secs(30))
        .unwrap();
    assert_eq!(out.rows.len(), 2);
    assert!(out.metrics.total_time >= out.metrics.embed_time);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = EngineConfig::default();
    config.search.max_align = 1;
    let err = Pipeline::builder()
        .config(config)
        .embedding(Arc::new(HashingEmbedder::default()))
        .search(Arc::new(DiagonalSearch))
        .build()
        .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}
