//! Integration tests for intake screening and pending-list management.

use pdfmerge::error::PdfMergeError;
use pdfmerge::intake::Intake;
use pdfmerge::queue::{MAX_FILES, MergeQueue, PendingFile};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::write_pdf;

#[tokio::test]
async fn test_screen_then_enqueue() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir.path().join("a.pdf"), 1);
    let b = write_pdf(&dir.path().join("b.pdf"), 2);

    let intake = Intake::new();
    let screened = intake.screen_batch(&[a, b]).await.unwrap();

    let mut queue = MergeQueue::new();
    queue.add_batch(screened).unwrap();

    assert_eq!(queue.len(), 2);
    assert!(queue.can_merge());
    assert_eq!(queue.names(), vec!["a.pdf", "b.pdf"]);
}

#[tokio::test]
async fn test_bad_batch_leaves_queue_unchanged() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir.path().join("a.pdf"), 1);
    let not_pdf = dir.path().join("notes.txt");
    std::fs::write(&not_pdf, b"plain text").unwrap();

    let intake = Intake::new();
    let mut queue = MergeQueue::new();
    queue
        .add_batch(vec![PendingFile::new(a.clone())])
        .unwrap();

    // The offending file rejects the whole batch before enqueueing.
    let result = intake.screen_batch(&[a, not_pdf]).await;
    assert!(matches!(result, Err(PdfMergeError::NotAPdf { .. })));

    assert_eq!(queue.len(), 1);
}

#[test]
fn test_ceiling_is_atomic() {
    let mut queue = MergeQueue::new();

    let first: Vec<PendingFile> = (0..MAX_FILES - 1)
        .map(|i| PendingFile::new(PathBuf::from(format!("{i}.pdf"))))
        .collect();
    queue.add_batch(first).unwrap();
    assert_eq!(queue.len(), MAX_FILES - 1);

    // Two more would exceed the ceiling, so neither is added.
    let overflow = vec![
        PendingFile::new(PathBuf::from("x.pdf")),
        PendingFile::new(PathBuf::from("y.pdf")),
    ];
    let result = queue.add_batch(overflow);
    assert!(matches!(result, Err(PdfMergeError::TooManyFiles { .. })));
    assert_eq!(queue.len(), MAX_FILES - 1);

    // A single file still fits.
    queue
        .add_batch(vec![PendingFile::new(PathBuf::from("z.pdf"))])
        .unwrap();
    assert_eq!(queue.len(), MAX_FILES);
}

#[test]
fn test_reorder_and_remove_flow() {
    let mut queue = MergeQueue::new();
    queue
        .add_batch(
            ["a.pdf", "b.pdf", "c.pdf", "d.pdf"]
                .iter()
                .map(|n| PendingFile::new(PathBuf::from(n)))
                .collect(),
        )
        .unwrap();

    // Move the last entry to the front.
    queue.move_entry(3, 0).unwrap();
    assert_eq!(queue.names(), vec!["d.pdf", "a.pdf", "b.pdf", "c.pdf"]);

    // Drop the second entry.
    let removed = queue.remove(1).unwrap();
    assert_eq!(removed.name, "a.pdf");
    assert_eq!(queue.names(), vec!["d.pdf", "b.pdf", "c.pdf"]);

    // Apply a full permutation.
    queue.permute(&[3, 1, 2]).unwrap();
    assert_eq!(queue.names(), vec!["c.pdf", "d.pdf", "b.pdf"]);
}

#[test]
fn test_merge_gate() {
    let mut queue = MergeQueue::new();
    assert!(!queue.can_merge());

    queue
        .add_batch(vec![PendingFile::new(PathBuf::from("a.pdf"))])
        .unwrap();
    assert!(!queue.can_merge());

    queue
        .add_batch(vec![PendingFile::new(PathBuf::from("b.pdf"))])
        .unwrap();
    assert!(queue.can_merge());

    queue.remove(0).unwrap();
    assert!(!queue.can_merge());
}

#[tokio::test]
async fn test_inspect_reports_pages() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir.path().join("a.pdf"), 3);
    let b = write_pdf(&dir.path().join("b.pdf"), 2);

    let intake = Intake::new();
    let summary = intake.inspect_all(&[a, b]).await.unwrap();

    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.total_pages, 5);
    assert_eq!(summary.reports[0].page_count, Some(3));
    assert!(!summary.reports[0].is_encrypted);
    assert!(summary.total_size > 0);
}
