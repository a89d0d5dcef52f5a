//! End-to-end merge tests: read, merge, save, reload.

use lopdf::Document;
use pdfmerge::io::{ArtifactWriter, BufferReader};
use pdfmerge::merge::Merger;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::write_pdf;

#[tokio::test]
async fn test_merge_two_files_end_to_end() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir.path().join("a.pdf"), 2);
    let b = write_pdf(&dir.path().join("b.pdf"), 3);
    let output = dir.path().join("merged.pdf");

    let reader = BufferReader::default();
    let buffers = reader.read_all(&[a, b]).await.unwrap();

    let merger = Merger::new();
    let outcome = merger.merge(buffers).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 5);

    let writer = ArtifactWriter::new();
    writer.save(&outcome.artifact, &output).await.unwrap();

    let reloaded = Document::load(&output).unwrap();
    assert_eq!(reloaded.get_pages().len(), 5);
}

#[rstest]
#[case(vec![1, 1], 2)]
#[case(vec![2, 3, 4], 9)]
#[case(vec![1, 1, 1, 1, 1, 1], 6)]
#[tokio::test]
async fn test_merged_page_count_is_sum(#[case] page_counts: Vec<usize>, #[case] expected: usize) {
    let dir = TempDir::new().unwrap();

    let mut paths = Vec::new();
    for (i, pages) in page_counts.iter().enumerate() {
        paths.push(write_pdf(&dir.path().join(format!("{i}.pdf")), *pages));
    }

    let reader = BufferReader::new(2);
    let buffers = reader.read_all(&paths).await.unwrap();

    let merger = Merger::new();
    let outcome = merger.merge(buffers).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, expected);
    assert_eq!(outcome.artifact.page_count(), expected);
}

#[tokio::test]
async fn test_merge_respects_input_order() {
    let dir = TempDir::new().unwrap();
    // Distinguish inputs by page count: 1 page, then 2, then 3.
    let paths = vec![
        write_pdf(&dir.path().join("one.pdf"), 1),
        write_pdf(&dir.path().join("two.pdf"), 2),
        write_pdf(&dir.path().join("three.pdf"), 3),
    ];

    let reader = BufferReader::default();

    let forward = reader.read_all(&paths).await.unwrap();
    assert_eq!(forward[0].name, "one.pdf");
    assert_eq!(forward[2].name, "three.pdf");

    let mut reversed_paths = paths.clone();
    reversed_paths.reverse();
    let reversed = reader.read_all(&reversed_paths).await.unwrap();
    assert_eq!(reversed[0].name, "three.pdf");

    let merger = Merger::new();
    let outcome = merger.merge(forward).await.unwrap();
    let outcome_rev = merger.merge(reversed).await.unwrap();

    // Same total either way; the order only affects page sequence.
    assert_eq!(outcome.statistics.total_pages, 6);
    assert_eq!(outcome_rev.statistics.total_pages, 6);
}

#[tokio::test]
async fn test_artifact_survives_roundtrip() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir.path().join("a.pdf"), 1);
    let b = write_pdf(&dir.path().join("b.pdf"), 1);
    let output = dir.path().join("merged.pdf");

    let reader = BufferReader::default();
    let buffers = reader.read_all(&[a, b]).await.unwrap();

    let merger = Merger::new();
    let outcome = merger.merge(buffers).await.unwrap();

    let writer = ArtifactWriter::new();
    let stats = writer
        .save_with_stats(&outcome.artifact, &output)
        .await
        .unwrap();

    assert_eq!(stats.file_size, outcome.artifact.len() as u64);
    assert_eq!(std::fs::read(&output).unwrap(), outcome.artifact.bytes());
}
