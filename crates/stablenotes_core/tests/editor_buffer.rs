use std::cell::Cell;
use std::rc::Rc;
use stablenotes_core::document::{Document, SNIPPET_MAX_CHARS};
use stablenotes_core::editor::{BufferEditor, EditOp, EditorError, EditorPort};

fn text_edit(text: &str) -> EditOp {
    EditOp::InsertText {
        text: text.to_string(),
        attributes: None,
    }
}

#[test]
fn editor_starts_disabled_and_rejects_edits() {
    let mut editor = BufferEditor::new().unwrap();

    assert!(!editor.is_enabled());
    assert!(matches!(
        editor.apply(text_edit("nope")),
        Err(EditorError::Disabled)
    ));
}

#[test]
fn user_edits_fire_the_change_listener_with_the_updated_document() {
    let mut editor = BufferEditor::new().unwrap();
    let notified = Rc::new(Cell::new(0usize));
    let seen = Rc::clone(&notified);
    editor.on_change(Box::new(move |document| {
        assert!(document.plain_text().contains("hello"));
        seen.set(seen.get() + 1);
    }));

    editor.set_enabled(true);
    editor.apply(text_edit("hello\n")).unwrap();

    assert_eq!(notified.get(), 1);
}

#[test]
fn programmatic_loads_do_not_fire_the_listener() {
    let mut editor = BufferEditor::new().unwrap();
    let notified = Rc::new(Cell::new(0usize));
    let seen = Rc::clone(&notified);
    editor.on_change(Box::new(move |_| seen.set(seen.get() + 1)));

    editor.load_document(Document::from_plain_text("loaded, not typed"));

    assert_eq!(notified.get(), 0);
    assert!(editor.document().plain_text().contains("loaded"));
}

#[test]
fn image_embeds_require_inline_data_urls() {
    let mut editor = BufferEditor::new().unwrap();
    editor.set_enabled(true);

    let rejected = editor.apply(EditOp::InsertImage {
        data_url: "https://example.com/cat.png".to_string(),
    });
    assert!(matches!(rejected, Err(EditorError::InvalidImageData(_))));

    editor
        .apply(EditOp::InsertImage {
            data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        })
        .unwrap();
}

#[test]
fn rule_embeds_and_replacement_edits_apply() {
    let mut editor = BufferEditor::new().unwrap();
    editor.set_enabled(true);

    editor.apply(EditOp::InsertRule).unwrap();
    editor
        .apply(EditOp::Replace {
            document: Document::from_plain_text("fresh"),
        })
        .unwrap();

    assert_eq!(editor.document().plain_text(), "fresh\n");
}

#[test]
fn plain_text_prefix_follows_snippet_rules() {
    let mut editor = BufferEditor::new().unwrap();
    editor.load_document(Document::from_plain_text("one\ntwo\nthree"));

    assert_eq!(editor.plain_text_prefix(SNIPPET_MAX_CHARS), "one two three");
}

#[test]
fn code_blocks_highlight_into_colored_spans() {
    let editor = BufferEditor::new().unwrap();

    let lines = editor.highlight("let x = 1;\n", Some("rs")).unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].len() > 1);
    let joined: String = lines[0].iter().map(|span| span.text.as_str()).collect();
    assert_eq!(joined, "let x = 1;\n");
}
