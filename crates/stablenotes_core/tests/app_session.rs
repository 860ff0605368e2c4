use chrono::NaiveDate;
use stablenotes_core::command::Decision;
use stablenotes_core::editor::{EditOp, EditorPort};
use stablenotes_core::view::EditorPaneView;
use stablenotes_core::{
    App, AppError, BackupError, BufferEditor, CategoryFilter, NoteStatus, Region,
    SqliteSnapshotStore,
};

fn memory_app() -> App<SqliteSnapshotStore, BufferEditor> {
    let store = SqliteSnapshotStore::open_in_memory().unwrap();
    let editor = BufferEditor::new().unwrap();
    App::new(store, editor).unwrap()
}

fn text_edit(text: &str) -> EditOp {
    EditOp::InsertText {
        text: text.to_string(),
        attributes: None,
    }
}

#[test]
fn session_boots_from_the_persisted_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stablenotes.db");

    {
        let store = SqliteSnapshotStore::open(&path).unwrap();
        let mut app = App::new(store, BufferEditor::new().unwrap()).unwrap();

        app.add_category("Work").unwrap();
        let work_id = app.state().categories[0].id;
        app.select_category(CategoryFilter::Category(work_id)).unwrap();
        app.create_note(1_000).unwrap();
        app.edit_title("Kickoff", 1_001).unwrap();
        app.flush().unwrap();
    }

    let store = SqliteSnapshotStore::open(&path).unwrap();
    let app = App::new(store, BufferEditor::new().unwrap()).unwrap();

    assert_eq!(app.state().categories.len(), 1);
    assert_eq!(app.state().notes.len(), 1);
    assert_eq!(app.state().notes[0].title, "Kickoff");
    assert!(app.state().notes[0].category_id.is_some());
}

#[test]
fn creating_a_note_enables_the_editor_on_its_content() {
    let mut app = memory_app();

    let region = app.create_note(1_000).unwrap();
    assert_eq!(region, Some(Region::All));
    assert!(app.editor().is_enabled());

    match app.view().editor {
        EditorPaneView::Active { note_id, status, .. } => {
            assert_eq!(Some(note_id), app.state().selected());
            assert_eq!(status, NoteStatus::Draft);
        }
        EditorPaneView::Empty { .. } => panic!("editor should be active"),
    }
}

#[test]
fn deleting_the_selected_note_clears_selection_and_editor() {
    let mut app = memory_app();
    app.create_note(1_000).unwrap();

    let region = app.delete_note(Decision::Confirmed).unwrap();

    assert_eq!(region, Some(Region::All));
    assert_eq!(app.state().selected(), None);
    assert!(app.state().notes.is_empty());
    assert!(!app.editor().is_enabled());
    assert!(matches!(app.view().editor, EditorPaneView::Empty { .. }));
}

#[test]
fn switching_selection_loads_content_without_scheduling_saves() {
    let mut app = memory_app();
    app.create_note(1_000).unwrap();
    let first_id = app.state().notes[0].id;
    app.apply_edit(text_edit("first body\n"), 1_100).unwrap();
    app.tick(1_600).unwrap();

    app.create_note(2_000).unwrap();
    app.select_note(first_id).unwrap();

    assert!(app.editor().document().plain_text().contains("first body"));
    assert!(!app.has_pending_saves());
}

#[test]
fn apply_edit_without_a_selection_is_a_silent_noop() {
    let mut app = memory_app();

    let region = app.apply_edit(text_edit("into the void"), 1_000).unwrap();

    assert_eq!(region, None);
    assert!(app.state().notes.is_empty());
}

#[test]
fn status_change_persists_before_reporting_the_note_list_region() {
    let mut app = memory_app();
    app.create_note(1_000).unwrap();

    let region = app.set_status(NoteStatus::InProgress, 2_000).unwrap();

    assert_eq!(region, Some(Region::NoteList));
    assert_eq!(app.state().notes[0].status, NoteStatus::InProgress);
}

#[test]
fn export_then_import_into_a_fresh_session_reproduces_the_state() {
    let mut source = memory_app();
    source.add_category("Research").unwrap();
    source.create_note(1_000).unwrap();
    source.edit_title("Findings", 1_001).unwrap();
    source.apply_edit(text_edit("details\n"), 1_002).unwrap();
    source.flush().unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let file = source.export_dated(date).unwrap();
    assert_eq!(file.file_name, "notes-backup-2024-02-29.json");

    let mut target = memory_app();
    let region = target.import(&file.json, Decision::Confirmed).unwrap();

    assert_eq!(region, Some(Region::All));
    assert_eq!(target.state().notes, source.state().notes);
    assert_eq!(target.state().categories, source.state().categories);
    assert_eq!(target.state().selected(), None);
    assert_eq!(target.state().filter(), CategoryFilter::All);
}

#[test]
fn malformed_import_fails_without_touching_state() {
    let mut app = memory_app();
    app.create_note(1_000).unwrap();
    let notes_before = app.state().notes.clone();

    let err = app
        .import(r#"{"notes": "not-an-array", "categories": []}"#, Decision::Confirmed)
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Backup(BackupError::InvalidShape(_))
    ));
    assert_eq!(app.state().notes, notes_before);
    assert_eq!(app.state().selected(), app.state().notes.first().map(|n| n.id));
}

#[test]
fn declined_import_is_a_noop() {
    let mut app = memory_app();
    app.create_note(1_000).unwrap();

    let region = app
        .import(r#"{"notes": [], "categories": []}"#, Decision::Declined)
        .unwrap();

    assert_eq!(region, None);
    assert_eq!(app.state().notes.len(), 1);
}

#[test]
fn export_of_an_empty_session_is_rejected() {
    let app = memory_app();
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    assert!(matches!(
        app.export_dated(date),
        Err(AppError::Backup(BackupError::NoData))
    ));
}

#[test]
fn blank_category_names_are_ignored_by_the_session() {
    let mut app = memory_app();

    let region = app.add_category("   ").unwrap();

    assert_eq!(region, None);
    assert!(app.state().categories.is_empty());
}
