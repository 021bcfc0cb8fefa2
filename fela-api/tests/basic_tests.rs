//! Basic tests for fela-api

use fela_api::*;
use fela_engine::{DiagonalSearch, HashingEmbedder, SearchRequest};
use std::sync::Arc;
use std::time::Duration;

struct FixedSearch(Vec<Segment>);

impl fela_engine::AlignmentSearch for FixedSearch {
    fn search(&self, _request: &SearchRequest<'_>) -> fela_engine::Result<Vec<Segment>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct StallingSearch;

impl fela_engine::AlignmentSearch for StallingSearch {
    fn search(&self, _request: &SearchRequest<'_>) -> fela_engine::Result<Vec<Segment>> {
        std::thread::sleep(Duration::from_millis(500));
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "stalling"
    }
}

fn aligner_with(segments: Vec<Segment>) -> Aligner {
    Aligner::from_backends(
        Config::offline(),
        Arc::new(HashingEmbedder::default()),
        Arc::new(FixedSearch(segments)),
    )
    .unwrap()
}

#[test]
fn test_input_text_processing() {
    let input = Input::Text("Hello world.".to_string());
    assert_eq!(input.read_text().unwrap(), "Hello world.");
}

#[test]
fn test_input_bytes_processing() {
    let input = Input::from_bytes(b"Hallo Welt.".to_vec());
    assert_eq!(input.read_text().unwrap(), "Hallo Welt.");

    let err = Input::from_bytes(vec![0xff, 0xfe]).read_text().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputError);
}

#[test]
fn test_config_builder() {
    let config = Config::builder()
        .offline()
        .max_align(3)
        .split_mode(SplitMode::Lines)
        .target_index(TargetIndexPolicy::TargetSequence)
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap();

    assert_eq!(config.num_overlaps(), 2);
    assert_eq!(config.engine().split_mode, SplitMode::Lines);
    assert_eq!(config.timeout(), Duration::from_secs(30));
}

#[test]
fn test_many_to_one_scenario() {
    let aligner = aligner_with(vec![Segment::new(vec![0, 1], vec![0])]);
    let response = aligner.align_text("A. B.", "X.").unwrap();

    assert_eq!(response.total_alignments, 2);
    assert_eq!(response.source_sentences, 2);
    assert_eq!(response.target_sentences, 1);
    assert_eq!(response.alignments[0].target.as_deref(), Some("X."));
    assert_eq!(response.alignments[1].target, None);
    assert_eq!(response.alignments[1].target_idx, Some(1));
}

#[test]
fn test_gap_filling_scenario() {
    let aligner = aligner_with(vec![Segment::new(1, 0)]);
    let response = aligner.align_text("A. B. C.", "Y.").unwrap();
    let targets: Vec<_> = response
        .alignments
        .iter()
        .map(|r| r.target.as_deref())
        .collect();
    assert_eq!(targets, vec![None, Some("Y."), None]);
}

#[test]
fn test_out_of_range_is_range_error() {
    let aligner = aligner_with(vec![Segment::new(5, 0)]);
    let err = aligner.align_text("A. B. C.", "X.").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeError);
    assert!(err.to_string().contains("(5, 0)"));
}

#[test]
fn test_empty_text_is_input_error() {
    let aligner = aligner_with(Vec::new());
    let err = aligner.align_text("", "X.").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputError);

    let err = aligner.align_text("A.", "  \n").unwrap_err();
    assert!(err.to_string().contains("target"));
}

#[test]
fn test_timeout_is_distinct() {
    let config = Config::builder()
        .offline()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let aligner = Aligner::from_backends(
        config,
        Arc::new(HashingEmbedder::default()),
        Arc::new(StallingSearch),
    )
    .unwrap();

    let err = aligner.align_text("A.", "X.").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimeoutError);
    assert!(err.is_retryable());
}

#[test]
fn test_grouped_keeps_segments() {
    let aligner = aligner_with(vec![Segment::new(0, 0), Segment::new(vec![1, 2], 1)]);
    let response = aligner
        .align_grouped(&AlignmentRequest::new("A. B. C.", "X. Y."))
        .unwrap();

    assert_eq!(response.alignments.len(), 2);
    assert_eq!(response.alignments[0].source, GroupedText::One("A.".to_string()));
    assert_eq!(
        response.alignments[1].source,
        GroupedText::Many(vec!["B.".to_string(), "C.".to_string()])
    );
    assert_eq!(response.metadata.search_backend, "fixed");
}

#[test]
fn test_offline_convenience() {
    let response = align_offline("One. Two. Three.", "Eins. Zwei. Drei.").unwrap();
    assert_eq!(response.total_alignments, 3);
    assert_eq!(response.alignments[2].target.as_deref(), Some("Drei."));
}

#[test]
fn test_normalize_segments_idempotent() {
    let segments = vec![Segment::new(0, 0), Segment::new(2, 1)];
    let first = normalize_segments(
        vec!["A.".into(), "B.".into(), "C.".into()],
        vec!["X.".into(), "Y.".into()],
        &segments,
        TargetIndexPolicy::RowPosition,
    )
    .unwrap();
    let second = normalize_segments(
        vec!["A.".into(), "B.".into(), "C.".into()],
        vec!["X.".into(), "Y.".into()],
        &segments,
        TargetIndexPolicy::RowPosition,
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_diagonal_backend_through_config() {
    let aligner = Aligner::with_config(Config::offline()).unwrap();
    assert_eq!(aligner.config().search(), &SearchSettings::Diagonal);

    let aligner =
        Aligner::from_backends(Config::offline(), Arc::new(HashingEmbedder::default()), Arc::new(DiagonalSearch))
            .unwrap();
    let response = aligner.align_text("A. B.", "X.").unwrap();
    assert_eq!(response.alignments[0].target.as_deref(), Some("X."));
    assert_eq!(response.alignments[1].target, None);
}

#[test]
fn test_split_text() {
    assert_eq!(
        split_text("Hi there. Bye now.", SplitMode::Punctuation),
        vec!["Hi there.", "Bye now."]
    );
}
