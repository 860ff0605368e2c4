//! Application orchestration.
//!
//! # Responsibility
//! - Own the state, snapshot store, editor and debounce scheduler; dispatch
//!   commands and run the effects they request.
//! - Sequence persistence strictly before the dependent note-list
//!   re-render, so displayed ordering is never ahead of storage.
//! - Keep the editor in sync with the selection.
//!
//! # Invariants
//! - Selection-driven document loads never schedule a save; only consumed
//!   change notifications do.
//! - Debounced saves fire through [`App::tick`]; only the most recent edit
//!   inside a window reaches storage.

use crate::backup::{self, BackupError, BackupFile};
use crate::command::{self, Decision, Outcome, Region};
use crate::document::Document;
use crate::editor::{EditOp, EditorError, EditorPort};
use crate::model::note::{NoteId, NoteStatus};
use crate::schedule::DebounceScheduler;
use crate::state::{AppState, CategoryFilter};
use crate::store::{SnapshotStore, StoreError};
use crate::view::{self, AppView};
use chrono::{Local, NaiveDate, Utc};
use log::info;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Editor(EditorError),
    Backup(BackupError),
    LinkOpen(std::io::Error),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Editor(err) => write!(f, "{err}"),
            Self::Backup(err) => write!(f, "{err}"),
            Self::LinkOpen(err) => write!(f, "failed to open link: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Editor(err) => Some(err),
            Self::Backup(err) => Some(err),
            Self::LinkOpen(err) => Some(err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<EditorError> for AppError {
    fn from(value: EditorError) -> Self {
        Self::Editor(value)
    }
}

impl From<BackupError> for AppError {
    fn from(value: BackupError) -> Self {
        Self::Backup(value)
    }
}

/// Current wall-clock time in unix epoch milliseconds.
pub fn wall_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// One running session: owned state plus its collaborators.
///
/// All methods run on the caller's thread; the model is cooperative and
/// event-driven, with no internal locking.
pub struct App<S: SnapshotStore, E: EditorPort> {
    state: AppState,
    store: S,
    editor: E,
    scheduler: DebounceScheduler,
    edited_doc: Rc<RefCell<Option<Document>>>,
}

impl<S: SnapshotStore, E: EditorPort> App<S, E> {
    /// Boots a session: loads persisted collections and wires the editor
    /// change listener into the content-save debounce.
    pub fn new(store: S, mut editor: E) -> AppResult<Self> {
        let persisted = store.load()?;

        let edited_doc: Rc<RefCell<Option<Document>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&edited_doc);
        editor.on_change(Box::new(move |document| {
            *sink.borrow_mut() = Some(document.clone());
        }));
        editor.set_enabled(false);

        Ok(Self {
            state: AppState::new(persisted.notes, persisted.categories),
            store,
            editor,
            scheduler: DebounceScheduler::new(),
            edited_doc,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Current projection of all three view regions.
    pub fn view(&self) -> AppView {
        view::render(&self.state)
    }

    pub fn has_pending_saves(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Earliest pending debounce deadline, for shells that sleep until it.
    pub fn next_save_deadline(&self) -> Option<i64> {
        self.scheduler.next_deadline()
    }

    /// Adds a category. Blank names are silently ignored.
    pub fn add_category(&mut self, name: &str) -> AppResult<Option<Region>> {
        let outcome = command::add_category(&mut self.state, name);
        if outcome.is_noop() {
            info!("event=category_create module=app status=skipped reason=blank_name");
        } else {
            info!("event=category_create module=app status=ok");
        }
        self.run(outcome, wall_clock_ms())
    }

    /// Creates a draft note scoped to the current filter and selects it.
    pub fn create_note(&mut self, now_ms: i64) -> AppResult<Option<Region>> {
        let outcome = command::add_note(&mut self.state, now_ms);
        info!("event=note_create module=app status=ok");
        self.run(outcome, now_ms)
    }

    pub fn select_note(&mut self, id: NoteId) -> AppResult<Option<Region>> {
        let outcome = command::select_note(&mut self.state, id);
        self.run(outcome, wall_clock_ms())
    }

    pub fn select_category(&mut self, filter: CategoryFilter) -> AppResult<Option<Region>> {
        let outcome = command::select_category(&mut self.state, filter);
        self.run(outcome, wall_clock_ms())
    }

    pub fn search(&mut self, text: &str) -> AppResult<Option<Region>> {
        let outcome = command::search_changed(&mut self.state, text);
        self.run(outcome, wall_clock_ms())
    }

    /// Deletes the selected note once confirmed. Irreversible.
    pub fn delete_note(&mut self, decision: Decision) -> AppResult<Option<Region>> {
        let outcome = command::delete_selected_note(&mut self.state, decision);
        if outcome.is_noop() {
            info!("event=note_delete module=app status=skipped");
        } else {
            info!("event=note_delete module=app status=ok");
        }
        self.run(outcome, wall_clock_ms())
    }

    /// Updates the selected note's title and restarts the title debounce.
    pub fn edit_title(&mut self, title: &str, now_ms: i64) -> AppResult<Option<Region>> {
        let outcome = command::edit_title(&mut self.state, title, now_ms);
        self.run(outcome, now_ms)
    }

    /// Updates the selected note's status; persists immediately.
    pub fn set_status(&mut self, status: NoteStatus, now_ms: i64) -> AppResult<Option<Region>> {
        let outcome = command::change_status(&mut self.state, status, now_ms);
        self.run(outcome, now_ms)
    }

    /// Applies a user edit to the editor and folds the resulting change
    /// notification into the content command.
    ///
    /// A disabled editor (nothing selected) makes this a silent no-op,
    /// mirroring the read-only pane.
    pub fn apply_edit(&mut self, op: EditOp, now_ms: i64) -> AppResult<Option<Region>> {
        match self.editor.apply(op) {
            Ok(()) => {}
            Err(EditorError::Disabled) => return Ok(None),
            Err(other) => return Err(other.into()),
        }
        self.consume_editor_change(now_ms)
    }

    /// Fires due debounced saves. Returns the note-list region once the
    /// corresponding write completed, `None` while nothing was due.
    pub fn tick(&mut self, now_ms: i64) -> AppResult<Option<Region>> {
        let due = self.scheduler.take_due(now_ms);
        if due.is_empty() {
            return Ok(None);
        }

        self.persist()?;
        info!(
            "event=debounce_flush module=app status=ok slots={}",
            due.len()
        );
        Ok(Some(Region::NoteList))
    }

    /// Persists pending debounced work immediately. Shutdown path.
    pub fn flush(&mut self) -> AppResult<()> {
        if self.scheduler.cancel_all() {
            self.persist()?;
        }
        Ok(())
    }

    /// Serializes the full state into a backup named after today.
    pub fn export(&self) -> AppResult<BackupFile> {
        self.export_dated(Local::now().date_naive())
    }

    /// Serializes the full state into a backup named after `date`.
    pub fn export_dated(&self, date: NaiveDate) -> AppResult<BackupFile> {
        let file = backup::export(&self.state.notes, &self.state.categories, date)?;
        info!(
            "event=backup_export module=app status=ok notes={} categories={}",
            self.state.notes.len(),
            self.state.categories.len()
        );
        Ok(file)
    }

    /// Validates a backup file and, once confirmed, replaces the entire
    /// state with its collections. Malformed input fails before any
    /// mutation.
    pub fn import(&mut self, raw: &str, decision: Decision) -> AppResult<Option<Region>> {
        let parsed = backup::parse(raw)?;
        let outcome = command::import_backup(&mut self.state, parsed, decision);
        if outcome.is_noop() {
            info!("event=backup_import module=app status=skipped");
        } else {
            info!(
                "event=backup_import module=app status=ok notes={} categories={}",
                self.state.notes.len(),
                self.state.categories.len()
            );
        }
        self.run(outcome, wall_clock_ms())
    }

    /// Opens an outbound link from note content, gated on explicit
    /// confirmation. Returns whether navigation happened.
    pub fn open_link(&self, url: &str, decision: Decision) -> AppResult<bool> {
        if decision == Decision::Declined {
            info!("event=link_open module=app status=skipped");
            return Ok(false);
        }
        open::that(url).map_err(AppError::LinkOpen)?;
        info!("event=link_open module=app status=ok");
        Ok(true)
    }

    fn run(&mut self, outcome: Outcome, now_ms: i64) -> AppResult<Option<Region>> {
        for effect in &outcome.effects {
            match effect {
                command::Effect::Persist => self.persist()?,
                command::Effect::ScheduleSave(slot) => self.scheduler.schedule(*slot, now_ms),
                command::Effect::Render(_) => {}
            }
        }

        // A full invalidation is the only case where the selection may have
        // changed; reload the editor from it.
        if outcome.render_region() == Some(Region::All) {
            self.sync_editor();
        }

        Ok(outcome.render_region())
    }

    fn sync_editor(&mut self) {
        match self.state.selected_note() {
            Some(note) => {
                let document = note.content.clone();
                self.editor.load_document(document);
                self.editor.set_enabled(true);
            }
            None => {
                self.editor.load_document(Document::empty());
                self.editor.set_enabled(false);
            }
        }
        // A programmatic load must never leave a stale change notification
        // behind to be mistaken for a user edit.
        self.edited_doc.borrow_mut().take();
    }

    fn consume_editor_change(&mut self, now_ms: i64) -> AppResult<Option<Region>> {
        let Some(document) = self.edited_doc.borrow_mut().take() else {
            return Ok(None);
        };
        let outcome = command::edit_content(&mut self.state, document, now_ms);
        self.run(outcome, now_ms)
    }

    fn persist(&mut self) -> AppResult<()> {
        self.store.save(&self.state.notes, &self.state.categories)?;
        Ok(())
    }
}
