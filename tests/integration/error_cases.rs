//! Failure-path integration tests.

use pdfmerge::error::PdfMergeError;
use pdfmerge::intake::Intake;
use pdfmerge::io::{BufferReader, FileBuffer};
use pdfmerge::merge::{Merger, merge_buffers};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{write_encrypted_pdf, write_pdf};

#[tokio::test]
async fn test_missing_input_rejected_at_screening() {
    let intake = Intake::new();
    let result = intake
        .screen_batch(&[PathBuf::from("/no/such/file.pdf")])
        .await;

    assert!(matches!(result, Err(PdfMergeError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_directory_rejected_at_screening() {
    let dir = TempDir::new().unwrap();

    let intake = Intake::new();
    let result = intake.screen_batch(&[dir.path().to_path_buf()]).await;

    assert!(matches!(result, Err(PdfMergeError::NotAFile { .. })));
}

#[tokio::test]
async fn test_non_pdf_rejected_at_screening() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.pdf");
    std::fs::write(&path, b"<html>not a pdf</html>").unwrap();

    let intake = Intake::new();
    let result = intake.screen_batch(&[path]).await;

    assert!(matches!(result, Err(PdfMergeError::NotAPdf { .. })));
}

#[tokio::test]
async fn test_encrypted_input_refused_with_names() {
    let dir = TempDir::new().unwrap();
    let clear = write_pdf(&dir.path().join("clear.pdf"), 1);
    let locked = write_encrypted_pdf(&dir.path().join("locked.pdf"));
    let output = dir.path().join("merged.pdf");

    let reader = BufferReader::default();
    let buffers = reader.read_all(&[clear, locked]).await.unwrap();

    let merger = Merger::new();
    let result = merger.merge(buffers).await;

    match result {
        Err(PdfMergeError::EncryptedInputs { names }) => {
            assert_eq!(names, vec!["locked.pdf".to_string()]);
        }
        other => panic!("expected EncryptedInputs, got {:?}", other.map(|_| ())),
    }

    // No output is produced when any input is encrypted.
    assert!(!output.exists());
}

#[tokio::test]
async fn test_multiple_encrypted_inputs_all_named() {
    let dir = TempDir::new().unwrap();
    let locked_a = write_encrypted_pdf(&dir.path().join("locked_a.pdf"));
    let clear = write_pdf(&dir.path().join("clear.pdf"), 2);
    let locked_b = write_encrypted_pdf(&dir.path().join("locked_b.pdf"));

    let reader = BufferReader::default();
    let buffers = reader.read_all(&[locked_a, clear, locked_b]).await.unwrap();

    match Merger::new().merge(buffers).await {
        Err(PdfMergeError::EncryptedInputs { names }) => {
            assert_eq!(
                names,
                vec!["locked_a.pdf".to_string(), "locked_b.pdf".to_string()]
            );
        }
        other => panic!("expected EncryptedInputs, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_single_buffer_refused() {
    let buffer = FileBuffer {
        name: "only.pdf".to_string(),
        path: PathBuf::from("only.pdf"),
        bytes: b"%PDF-1.4".to_vec(),
    };

    let result = merge_buffers(&[buffer]);
    assert!(matches!(
        result,
        Err(PdfMergeError::TooFewFiles { count: 1 })
    ));
}

#[tokio::test]
async fn test_unreadable_buffer_reported() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(&dir.path().join("good.pdf"), 1);
    // Passes header screening but cannot be parsed.
    let truncated = dir.path().join("truncated.pdf");
    std::fs::write(&truncated, b"%PDF-1.4\ngarbage").unwrap();

    let reader = BufferReader::default();
    let buffers = reader.read_all(&[good, truncated]).await.unwrap();

    let result = Merger::new().merge(buffers).await;
    assert!(matches!(
        result,
        Err(PdfMergeError::FailedToLoadPdf { .. })
    ));
}

#[test]
fn test_exit_codes_are_distinct() {
    let errors = [
        PdfMergeError::file_not_found(PathBuf::from("a.pdf")),
        PdfMergeError::EncryptedInputs {
            names: vec!["a.pdf".to_string()],
        },
        PdfMergeError::output_exists(PathBuf::from("merged.pdf")),
        PdfMergeError::merge_failed("broken"),
        PdfMergeError::invalid_config("bad"),
    ];

    for err in &errors {
        assert_ne!(err.exit_code(), 0);
    }
}
