use jot::document::Document;
use jot::file::{SaveOutcome, open_document, save_document, save_document_as};

#[test]
fn test_full_save_open_cycle_preserves_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cycle.txt");

    let mut doc = Document::new();
    doc.set_content("alpha\nbeta\n\ngamma with trailing spaces   \n");
    save_document_as(&mut doc, &path).unwrap();

    let reopened = open_document(&path).unwrap();
    assert_eq!(reopened.content(), doc.content());
    assert!(!reopened.is_modified());
    assert_eq!(reopened.display_name(), "cycle.txt");
}

#[test]
fn test_repeated_saves_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("again.txt");

    let mut doc = Document::new();
    doc.set_content("same text");
    doc.set_file_path(&path);

    assert_eq!(save_document(&mut doc).unwrap(), SaveOutcome::Saved);
    assert_eq!(save_document(&mut doc).unwrap(), SaveOutcome::Saved);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "same text");
}

#[test]
fn test_unicode_content_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unicode.txt");

    let mut doc = Document::new();
    doc.set_content("naïve café — 你好 🦀\n");
    save_document_as(&mut doc, &path).unwrap();

    assert_eq!(open_document(&path).unwrap().content(), "naïve café — 你好 🦀\n");
}

#[test]
fn test_open_edit_save_open_sees_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edit.txt");
    std::fs::write(&path, "v1").unwrap();

    let mut doc = open_document(&path).unwrap();
    doc.set_content("v2");
    assert!(doc.is_modified());
    save_document(&mut doc).unwrap();

    assert_eq!(open_document(&path).unwrap().content(), "v2");
}
