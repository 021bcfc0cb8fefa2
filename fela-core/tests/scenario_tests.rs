//! End-to-end scenarios over raw aligner output

use fela_core::{
    normalize, AlignmentNormalizer, CoreError, OverlapEmbeddings, Segment, SentenceList, Side,
    TargetIndexPolicy, WindowPlan,
};

fn list(side: Side, texts: &[&str]) -> SentenceList {
    SentenceList::from_strs(side, texts).unwrap()
}

#[test]
fn test_raw_json_to_rows() {
    let source = list(Side::Source, &["Hello.", "How are you?", "Fine.", "Bye."]);
    let target = list(Side::Target, &["Bonjour.", "Comment ça va ?", "Au revoir."]);

    // Bare indices, lists and float-typed indices in one payload
    let raw = r#"[[0, 0], [[1, 2], [1]], [3.0, 2.0]]"#;
    let segments: Vec<Segment> = serde_json::from_str(raw).unwrap();

    let rows = normalize(&source, &target, &segments).unwrap();
    let json = serde_json::to_value(&rows).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            {"source": "Hello.", "target": "Bonjour.", "source_idx": 0, "target_idx": 0},
            {"source": "How are you?", "target": "Comment ça va ?", "source_idx": 1, "target_idx": 1},
            {"source": "Fine.", "target": null, "source_idx": 2, "target_idx": 2},
            {"source": "Bye.", "target": "Au revoir.", "source_idx": 3, "target_idx": 3},
        ])
    );
}

#[test]
fn test_target_sequence_policy_serializes_null_index() {
    let source = list(Side::Source, &["A.", "B."]);
    let target = list(Side::Target, &["X."]);
    let rows = AlignmentNormalizer::new(TargetIndexPolicy::TargetSequence)
        .normalize(&source, &target, &[Segment::new(1, 0)])
        .unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["target_idx"], serde_json::Value::Null);
    assert_eq!(json[1]["target_idx"], 0);
}

#[test]
fn test_leading_and_trailing_gaps() {
    let source = list(Side::Source, &["A.", "B.", "C.", "D.", "E."]);
    let target = list(Side::Target, &["X.", "Y."]);
    let rows = normalize(
        &source,
        &target,
        &[Segment::new(vec![1, 2], vec![0, 1])],
    )
    .unwrap();
    let targets: Vec<Option<&str>> = rows.iter().map(|r| r.target.as_deref()).collect();
    assert_eq!(targets, vec![None, Some("X."), None, None, None]);
}

#[test]
fn test_out_of_range_source_index() {
    let source = list(Side::Source, &["A.", "B.", "C."]);
    let target = list(Side::Target, &["X."]);
    let err = normalize(&source, &target, &[Segment::new(5, 0)]).unwrap_err();
    assert!(matches!(err, CoreError::OutOfRange { index: 5, .. }));
}

#[test]
fn test_reshape_mismatch() {
    // 3 sentences, num_overlaps 2: 5 windows planned
    let plan = WindowPlan::new(3, 2).unwrap();
    let vectors = vec![vec![0.0f32; 8]; 6];
    let err = OverlapEmbeddings::from_vectors(&vectors, &[1; 5], plan.clone()).unwrap_err();
    assert!(matches!(err, CoreError::Shape { .. }));

    let err = OverlapEmbeddings::from_flat(&[0.0; 6 * 8 + 1], 8, &[1; 5], plan).unwrap_err();
    assert!(matches!(err, CoreError::Shape { .. }));
}

#[test]
fn test_reshape_mismatch_divisible_buffer() {
    // 6 x 5 floats is a multiple of the 5 planned windows but holds 6 vectors
    let plan = WindowPlan::new(3, 2).unwrap();
    let err = OverlapEmbeddings::from_flat(&[0.0; 6 * 5], 5, &[1; 5], plan.clone()).unwrap_err();
    assert!(matches!(err, CoreError::Shape { .. }));

    let ok = OverlapEmbeddings::from_flat(&[0.0; 5 * 5], 5, &[1; 5], plan).unwrap();
    assert_eq!(ok.vectors().shape(), &[2, 3, 5]);
}
