use super::*;
use crate::kernel::services::ports::{Identity, IdentityError, Settings};
use crate::kernel::{AccessGate, BottomPanelTab, Theme};
use crate::models::{
    seed_project, FileEntry, FileNode, Forest, Language, NodeId, NodeIdGenerator, NodeKind,
};
use std::time::{Duration, Instant};

fn new_store() -> Store {
    Store::new(AppState::new(seed_project(), &Settings::default()))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

fn last_console(store: &Store) -> &str {
    store
        .state()
        .console
        .console()
        .last()
        .map(|l| l.text.as_str())
        .unwrap_or("")
}

fn create(store: &mut Store, kind: NodeKind, name: &str) {
    store.dispatch(Action::ExplorerBeginCreate { kind });
    store.dispatch(Action::ExplorerCommitCreate {
        name: name.to_string(),
    });
}

#[test]
fn new_file_next_to_top_level_file_lands_at_root() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSelect {
        id: Some(id("utils-js")),
    });
    let roots_before = store.state().forest.len();

    create(&mut store, NodeKind::File, "index.html");

    let roots = store.state().forest.roots();
    assert_eq!(roots.len(), roots_before + 1);
    assert_eq!(roots[roots.len() - 2].id(), "utils-js");
    let FileNode::File(created) = &roots[roots.len() - 1] else {
        panic!("expected a file");
    };
    assert_eq!(created.name, "index.html");
    assert_eq!(created.language, Language::Html);
    assert!(created.content.is_empty());
    assert!(created.breakpoints.is_empty());
    assert!(store.state().explorer.creating.is_none());
}

#[test]
fn fresh_session_creates_at_root() {
    let mut store = new_store();
    assert!(store.state().selected_id.is_none());
    assert!(store.state().active_file().is_some());

    let roots_before = store.state().forest.len();
    let boilerplate_before = store
        .state()
        .forest
        .find_node_by_id("html-boilerplate")
        .unwrap()
        .children()
        .len();

    create(&mut store, NodeKind::File, "first.html");

    assert_eq!(store.state().forest.len(), roots_before + 1);
    assert_eq!(
        store.state().forest.roots().last().map(FileNode::name),
        Some("first.html")
    );
    assert_eq!(
        store
            .state()
            .forest
            .find_node_by_id("html-boilerplate")
            .unwrap()
            .children()
            .len(),
        boilerplate_before
    );
}

#[test]
fn toggle_folder_flips_folders_only() {
    let mut store = new_store();
    let folder = id("css-animation");
    assert!(!store.state().explorer.is_expanded(&folder));

    let opened = store.dispatch(Action::ExplorerToggleFolder { id: folder.clone() });
    assert!(opened.state_changed);
    assert!(store.state().explorer.is_expanded(&folder));

    let closed = store.dispatch(Action::ExplorerToggleFolder { id: folder.clone() });
    assert!(closed.state_changed);
    assert!(!store.state().explorer.is_expanded(&folder));

    let file = store.dispatch(Action::ExplorerToggleFolder { id: id("utils-js") });
    assert!(!file.state_changed);
    assert!(!store.state().explorer.is_expanded(&id("utils-js")));

    let missing = store.dispatch(Action::ExplorerToggleFolder { id: id("gone") });
    assert!(!missing.state_changed);
    assert!(store.state().selected_id.is_none());
}

#[test]
fn refused_create_keeps_the_request_open() {
    let taken = 5_000_000_000_000u64;
    let forest = Forest::new(vec![FileEntry::new(taken.to_string(), "taken.js").into()]);
    let mut store = Store::new(AppState::new(forest, &Settings::default()));
    store.state.ids = NodeIdGenerator::resume_after(taken - 1);

    store.dispatch(Action::ExplorerBeginCreate {
        kind: NodeKind::File,
    });
    let before = store.state().forest.clone();
    let result = store.dispatch(Action::ExplorerCommitCreate {
        name: "clash.js".to_string(),
    });

    assert!(!result.state_changed);
    assert_eq!(store.state().forest, before);
    assert!(store.state().explorer.creating.is_some());

    let retry = store.dispatch(Action::ExplorerCommitCreate {
        name: "clash.js".to_string(),
    });
    assert!(retry.state_changed);
    assert_eq!(store.state().forest.len(), 2);
    assert!(store.state().explorer.creating.is_none());
}

#[test]
fn loaded_numeric_ids_are_not_reused() {
    let taken = 5_000_000_000_000u64;
    let forest = Forest::new(vec![FileEntry::new(taken.to_string(), "taken.js").into()]);
    let mut store = Store::new(AppState::new(forest, &Settings::default()));

    create(&mut store, NodeKind::File, "next.js");
    let roots = store.state().forest.roots();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[1].id().as_str(), (taken + 1).to_string());
}

#[test]
fn new_file_in_collapsed_folder_expands_it() {
    let mut store = new_store();
    let folder = id("tailwind-setup");
    assert!(!store.state().explorer.is_expanded(&folder));

    store.dispatch(Action::ExplorerSelect {
        id: Some(folder.clone()),
    });
    store.dispatch(Action::ExplorerSelect {
        id: Some(folder.clone()),
    });
    assert!(!store.state().explorer.is_expanded(&folder));

    let before = store
        .state()
        .forest
        .find_node_by_id(&folder)
        .unwrap()
        .children()
        .len();
    create(&mut store, NodeKind::File, "extra.js");

    let children = store.state().forest.find_node_by_id(&folder).unwrap().children();
    assert_eq!(children.len(), before + 1);
    assert_eq!(children.last().map(FileNode::name), Some("extra.js"));
    assert!(store.state().explorer.is_expanded(&folder));
}

#[test]
fn begin_create_forces_the_selected_folder_open() {
    let mut store = new_store();
    let folder = id("html-boilerplate");
    assert!(store.state().explorer.is_expanded(&folder));

    // selecting an expanded folder collapses it
    store.dispatch(Action::ExplorerSelect {
        id: Some(folder.clone()),
    });
    assert!(!store.state().explorer.is_expanded(&folder));

    store.dispatch(Action::ExplorerBeginCreate {
        kind: NodeKind::Folder,
    });
    assert!(store.state().explorer.is_expanded(&folder));
    store.dispatch(Action::ExplorerBeginCreate {
        kind: NodeKind::Folder,
    });
    assert!(store.state().explorer.is_expanded(&folder));
    assert_eq!(
        store.state().explorer.creating.as_ref().and_then(|p| p.parent.clone()),
        Some(folder)
    );
}

#[test]
fn new_file_next_to_nested_file_goes_into_its_folder() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSelect {
        id: Some(id("css-animation-css")),
    });
    create(&mut store, NodeKind::Folder, "fonts");

    let children = store
        .state()
        .forest
        .find_node_by_id("css-animation")
        .unwrap()
        .children();
    assert_eq!(children.len(), 3);
    assert!(children[2].is_folder());
    assert_eq!(children[2].name(), "fonts");
}

#[test]
fn new_node_without_selection_goes_to_root() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSelect { id: None });
    assert!(store.state().selected_id.is_none());

    create(&mut store, NodeKind::Folder, "assets");
    let last = store.state().forest.roots().last().unwrap();
    assert_eq!(last.name(), "assets");
    assert!(last.children().is_empty());
}

#[test]
fn blank_names_keep_the_request_open() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerBeginCreate {
        kind: NodeKind::File,
    });
    let forest = store.state().forest.clone();

    let result = store.dispatch(Action::ExplorerCommitCreate {
        name: "   ".to_string(),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().forest, forest);
    assert!(store.state().explorer.creating.is_some());

    store.dispatch(Action::ExplorerCancelCreate);
    assert!(store.state().explorer.creating.is_none());
    let result = store.dispatch(Action::ExplorerCommitCreate {
        name: "late.js".to_string(),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().forest, forest);
}

#[test]
fn created_ids_are_unique() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSelect { id: None });
    for name in ["a.js", "b.js", "c.js"] {
        create(&mut store, NodeKind::File, name);
    }
    let ids: Vec<_> = store.state().forest.roots()[7..]
        .iter()
        .map(|n| n.id().clone())
        .collect();
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);
}

#[test]
fn selecting_a_file_makes_it_active() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSelect {
        id: Some(id("readme-md")),
    });
    assert_eq!(store.state().active_file().map(|f| f.name.as_str()), Some("README.md"));
    assert_eq!(store.state().selected_id, Some(id("readme-md")));
}

#[test]
fn selecting_a_folder_keeps_the_active_file() {
    let mut store = new_store();
    let before = store.state().active_file_id.clone();
    store.dispatch(Action::ExplorerSelect {
        id: Some(id("public")),
    });
    assert_eq!(store.state().active_file_id, before);
    assert_eq!(store.state().selected_id, Some(id("public")));
}

#[test]
fn open_file_ignores_folders_and_unknown_ids() {
    let mut store = new_store();
    assert!(!store.dispatch(Action::OpenFile { id: id("public") }).state_changed);
    assert!(!store.dispatch(Action::OpenFile { id: id("nope") }).state_changed);
    assert_eq!(
        store.state().active_file_id.as_ref().map(|i| i.as_str()),
        Some("html-boilerplate-index")
    );
}

#[test]
fn edits_reach_the_preview_after_the_debounce() {
    let mut store = new_store();
    let t0 = Instant::now();

    for (at, text) in [(0, "<p>a"), (100, "<p>ab"), (200, "<p>abc"), (300, "<p>abcd")] {
        store.dispatch(Action::EditorEdit {
            content: text.to_string(),
            now: t0 + ms(at),
        });
        store.dispatch(Action::Tick { now: t0 + ms(at) });
    }

    assert_eq!(store.state().active_file().unwrap().content, "<p>abcd");
    for at in [400, 600, 799] {
        assert!(!store.dispatch(Action::Tick { now: t0 + ms(at) }).state_changed);
        assert!(store.state().preview.code().contains("Hello, world!"));
    }

    assert!(store.dispatch(Action::Tick { now: t0 + ms(800) }).state_changed);
    assert_eq!(store.state().preview.code(), "<p>abcd");
}

#[test]
fn switching_files_drops_the_pending_preview() {
    let mut store = new_store();
    let t0 = Instant::now();

    store.dispatch(Action::EditorEdit {
        content: "<h1>old file</h1>".to_string(),
        now: t0,
    });
    store.dispatch(Action::ExplorerSelect {
        id: Some(id("tailwind-setup-html")),
    });
    let expected = store.state().active_file().unwrap().content.clone();
    assert_eq!(store.state().preview.code(), expected);

    store.dispatch(Action::Tick { now: t0 + ms(500) });
    store.dispatch(Action::Tick { now: t0 + ms(5_000) });
    assert_eq!(store.state().preview.code(), expected);
    assert!(!store.state().preview.code().contains("old file"));

    let old = store
        .state()
        .forest
        .find_node_by_id("html-boilerplate-index")
        .and_then(FileNode::as_file)
        .unwrap();
    assert_eq!(old.content, "<h1>old file</h1>");
}

#[test]
fn non_html_files_feed_an_empty_preview() {
    let mut store = new_store();
    let t0 = Instant::now();
    store.dispatch(Action::OpenFile { id: id("utils-js") });
    assert_eq!(store.state().preview.code(), "");

    store.dispatch(Action::EditorEdit {
        content: "<b>not rendered</b>".to_string(),
        now: t0,
    });
    store.dispatch(Action::Tick { now: t0 + ms(500) });
    assert_eq!(store.state().preview.code(), "");
    assert_eq!(store.state().active_file().unwrap().content, "<b>not rendered</b>");
}

#[test]
fn edit_without_active_file_is_ignored() {
    let mut settings = Settings::default();
    settings.project.active_file = None;
    let mut store = Store::new(AppState::new(seed_project(), &settings));
    let forest = store.state().forest.clone();

    let result = store.dispatch(Action::EditorEdit {
        content: "x".to_string(),
        now: Instant::now(),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().forest, forest);
    assert!(!store.state().preview.debounce().is_pending());
}

#[test]
fn live_toggle_logs_and_needs_a_file() {
    let mut store = new_store();
    store.dispatch(Action::ToggleLivePreview);
    assert!(store.state().preview.live);
    assert_eq!(last_console(&store), "Live preview running");

    store.dispatch(Action::ToggleLivePreview);
    assert!(!store.state().preview.live);
    assert_eq!(last_console(&store), "Live preview paused");

    let mut settings = Settings::default();
    settings.project.active_file = None;
    let mut empty = Store::new(AppState::new(Forest::default(), &settings));
    assert!(!empty.dispatch(Action::ToggleLivePreview).state_changed);
    assert!(!empty.state().preview.live);
    assert!(empty.state().console.console().is_empty());
}

#[test]
fn open_in_new_tab_emits_the_document() {
    let mut store = new_store();
    let result = store.dispatch(Action::OpenPreviewInNewTab);
    let code = store.state().preview.code().to_string();
    assert_eq!(result.effects, vec![Effect::OpenPreviewWindow { html: code }]);
    assert_eq!(last_console(&store), "Opened live preview in new tab");

    store.dispatch(Action::OpenFile { id: id("readme-md") });
    let result = store.dispatch(Action::OpenPreviewInNewTab);
    assert!(result.effects.is_empty());
    assert!(!result.state_changed);
}

#[test]
fn save_and_refresh_only_log() {
    let mut store = new_store();
    let forest = store.state().forest.clone();

    store.dispatch(Action::SaveActiveFile);
    assert_eq!(last_console(&store), "File index.html saved");
    store.dispatch(Action::ExplorerRefresh);
    assert_eq!(last_console(&store), "Explorer refreshed");
    assert_eq!(store.state().forest, forest);

    let mut settings = Settings::default();
    settings.project.active_file = None;
    let mut empty = Store::new(AppState::new(seed_project(), &settings));
    empty.dispatch(Action::SaveActiveFile);
    assert_eq!(last_console(&empty), "File unknown saved");
}

#[test]
fn edits_to_an_added_file_stay_in_place() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSelect {
        id: Some(id("public")),
    });
    create(&mut store, NodeKind::File, "page.html");
    let new_id = store
        .state()
        .forest
        .find_node_by_id("public")
        .unwrap()
        .children()[0]
        .id()
        .clone();

    store.dispatch(Action::OpenFile { id: new_id.clone() });
    assert_eq!(store.state().preview.code(), "");
    let t0 = Instant::now();
    store.dispatch(Action::EditorEdit {
        content: "<i>new</i>".to_string(),
        now: t0,
    });
    store.dispatch(Action::Tick { now: t0 + ms(500) });

    assert_eq!(store.state().preview.code(), "<i>new</i>");
    let public = store.state().forest.find_node_by_id("public").unwrap();
    assert_eq!(public.children().len(), 1);
    assert_eq!(public.children()[0].id(), &new_id);
}

#[test]
fn bottom_panel_theme_and_terminal() {
    let mut store = new_store();
    assert!(
        !store
            .dispatch(Action::BottomPanelSetTab {
                tab: BottomPanelTab::Console
            })
            .state_changed
    );
    assert!(
        store
            .dispatch(Action::BottomPanelSetTab {
                tab: BottomPanelTab::Terminal
            })
            .state_changed
    );

    store.dispatch(Action::TerminalAppend {
        line: "INFO started".to_string(),
    });
    let lines = store.state().console.visible_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].text, "INFO started");

    store.dispatch(Action::ToggleTheme);
    assert_eq!(store.state().ui.theme, Theme::Dark);
}

#[test]
fn identity_result_drives_the_gate() {
    let mut store = new_store();
    assert!(!store.state().gate.is_granted());

    let result = store.dispatch(Action::IdentityResolved(Err(IdentityError::Unauthenticated)));
    assert!(result.state_changed);
    assert!(matches!(store.state().gate, AccessGate::Denied { .. }));

    let identity = Identity {
        user_id: "u1".to_string(),
        display_name: "Ada".to_string(),
    };
    store.dispatch(Action::IdentityResolved(Ok(identity.clone())));
    assert_eq!(store.state().gate.identity(), Some(&identity));

    let again = store.dispatch(Action::IdentityResolved(Ok(identity)));
    assert!(!again.state_changed);
}

#[test]
fn resolver_follows_forest_changes() {
    let forest = Forest::new(vec![FileEntry::new("only", "only.html")
        .with_content("<p>x</p>")
        .into()]);
    let mut settings = Settings::default();
    settings.project.active_file = Some("only".to_string());
    let mut store = Store::new(AppState::new(forest, &settings));

    assert_eq!(store.state().preview.code(), "<p>x</p>");
    store.dispatch(Action::EditorEdit {
        content: "<p>y</p>".to_string(),
        now: Instant::now(),
    });
    assert_eq!(store.state().active_file().unwrap().content, "<p>y</p>");
}
