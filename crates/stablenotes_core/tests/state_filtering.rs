use stablenotes_core::{AppState, Category, CategoryFilter, Note};

fn note_with(category: Option<&Category>, title: &str, snippet: &str, updated_at: i64) -> Note {
    let mut note = Note::new(category.map(|category| category.id), updated_at);
    note.title = title.to_string();
    note.snippet = snippet.to_string();
    note
}

#[test]
fn category_filter_returns_exactly_matching_notes_newest_first() {
    let work = Category::new("work");
    let home = Category::new("home");
    let notes = vec![
        note_with(Some(&work), "standup", "", 1_000),
        note_with(Some(&home), "groceries", "", 2_000),
        note_with(Some(&work), "retro", "", 3_000),
        note_with(None, "loose", "", 4_000),
    ];
    let mut state = AppState::new(notes, vec![work.clone(), home]);

    state.set_filter(CategoryFilter::Category(work.id));
    let visible = state.visible_notes();

    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].title, "retro");
    assert_eq!(visible[1].title, "standup");
}

#[test]
fn sentinel_all_matches_every_note() {
    let work = Category::new("work");
    let notes = vec![
        note_with(Some(&work), "a", "", 1),
        note_with(None, "b", "", 2),
    ];
    let state = AppState::new(notes, vec![work]);

    assert_eq!(state.visible_notes().len(), 2);
}

#[test]
fn search_overrides_the_active_category_filter() {
    let work = Category::new("work");
    let home = Category::new("home");
    let notes = vec![
        note_with(Some(&work), "meeting notes", "", 1_000),
        note_with(Some(&home), "garden meeting", "", 2_000),
    ];
    let mut state = AppState::new(notes, vec![work.clone(), home]);

    state.set_filter(CategoryFilter::Category(work.id));
    state.set_search("meeting");

    let visible = state.visible_notes();
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].title, "garden meeting");
}

#[test]
fn search_matches_title_or_snippet_case_insensitively() {
    let notes = vec![
        note_with(None, "Rust Patterns", "", 1_000),
        note_with(None, "shopping", "remember the RUSTIC bread", 2_000),
        note_with(None, "unrelated", "nothing here", 3_000),
    ];
    let mut state = AppState::new(notes, Vec::new());

    state.set_search("rust");
    let visible = state.visible_notes();

    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|note| note.title != "unrelated"));
}

#[test]
fn changing_the_filter_clears_search_and_selection() {
    let work = Category::new("work");
    let note = note_with(Some(&work), "a", "", 1);
    let id = note.id;
    let mut state = AppState::new(vec![note], vec![work.clone()]);

    state.set_search("a");
    state.select(id);
    state.set_filter(CategoryFilter::Category(work.id));

    assert_eq!(state.search(), "");
    assert_eq!(state.selected(), None);
}

#[test]
fn changing_the_search_resets_filter_and_selection() {
    let work = Category::new("work");
    let note = note_with(Some(&work), "a", "", 1);
    let id = note.id;
    let mut state = AppState::new(vec![note], vec![work.clone()]);

    state.set_filter(CategoryFilter::Category(work.id));
    let selected = state.select(id);
    assert!(selected);

    state.set_search("query");
    assert_eq!(state.filter(), CategoryFilter::All);
    assert_eq!(state.selected(), None);
}

#[test]
fn ordering_follows_updated_timestamps_after_a_touch() {
    let mut older = note_with(None, "older", "", 1_000);
    let newer = note_with(None, "newer", "", 2_000);
    older.touch(5_000);
    let state = AppState::new(vec![older, newer], Vec::new());

    let visible = state.visible_notes();
    assert_eq!(visible[0].title, "older");
    assert_eq!(visible[1].title, "newer");
}
