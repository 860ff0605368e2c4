//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stablenotes_core` wiring
//!   without any UI shell.
//! - Keep output deterministic for quick local sanity checks.

use stablenotes_core::{App, BufferEditor, SqliteSnapshotStore};

fn main() {
    println!("stablenotes_core ping={}", stablenotes_core::ping());
    println!("stablenotes_core version={}", stablenotes_core::core_version());

    let store = match SqliteSnapshotStore::open_in_memory() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("store bootstrap failed: {err}");
            std::process::exit(1);
        }
    };
    let editor = match BufferEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("editor bootstrap failed: {err}");
            std::process::exit(1);
        }
    };

    match App::new(store, editor) {
        Ok(app) => {
            let view = app.view();
            println!(
                "session ok categories={} notes={}",
                view.sidebar.entries.len() - 1,
                view.note_list.items.len()
            );
        }
        Err(err) => {
            eprintln!("session bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
