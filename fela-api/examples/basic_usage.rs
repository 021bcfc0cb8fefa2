//! Basic usage of the alignment API

use fela_api::{
    align_offline, normalize_segments, Aligner, AlignmentRequest, Config, Segment,
    TargetIndexPolicy,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: Offline convenience function
    println!("=== Method 1: Offline Convenience Function ===");
    let response = align_offline(
        "The sun rises. Birds start to sing. The town wakes up.",
        "Die Sonne geht auf. Die Vögel singen. Die Stadt erwacht.",
    )?;
    for row in &response.alignments {
        println!(
            "  [{}] {} => {}",
            row.source_idx,
            row.source,
            row.target.as_deref().unwrap_or("-")
        );
    }
    println!("Processing took {}ms\n", response.metadata.processing_time_ms);

    // Method 2: Custom configuration
    println!("=== Method 2: Custom Configuration ===");
    let config = Config::builder()
        .offline()
        .max_align(3)
        .target_index(TargetIndexPolicy::TargetSequence)
        .build()?;
    let aligner = Aligner::with_config(config)?;
    let grouped = aligner.align_grouped(&AlignmentRequest::new(
        "One. Two. Three. Four.",
        "Eins und zwei. Drei und vier.",
    ))?;
    println!("{} segments", grouped.alignments.len());
    for alignment in &grouped.alignments {
        println!("  {} => {}", alignment.source.joined(), alignment.target.joined());
    }

    // Method 3: Normalizing segments from an external aligner
    println!("\n=== Method 3: Normalize Raw Segments ===");
    let rows = normalize_segments(
        vec!["A.".into(), "B.".into(), "C.".into()],
        vec!["Y.".into()],
        &[Segment::new(1, 0)],
        TargetIndexPolicy::RowPosition,
    )?;
    println!("{}", serde_json::to_string_pretty(&rows)?);

    Ok(())
}
