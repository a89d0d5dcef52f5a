//! Shared helpers for integration tests.
//!
//! Fixtures are generated with lopdf rather than checked in, so every
//! test starts from a document with a known page count.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Build an in-memory document with the given number of pages.
pub fn build_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.4");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"BT ET".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated document with the given page count to `path`.
pub fn write_pdf(path: &Path, pages: usize) -> PathBuf {
    let mut doc = build_document(pages);
    doc.save(path).unwrap();
    path.to_path_buf()
}

/// Write a document carrying an encryption dictionary to `path`.
pub fn write_encrypted_pdf(path: &Path) -> PathBuf {
    let mut doc = build_document(1);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal(vec![0u8; 32]),
        "U" => Object::string_literal(vec![0u8; 32]),
        "P" => -44,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.save(path).unwrap();
    path.to_path_buf()
}
