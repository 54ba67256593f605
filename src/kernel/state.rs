use rustc_hash::FxHashSet;
use std::time::Duration;

use super::console::ConsoleState;
use super::debounce::Debouncer;
use super::gate::AccessGate;
use super::services::ports::Settings;
use crate::models::{
    FileEntry, FileNode, FileTreeRow, Forest, Language, NodeId, NodeIdGenerator, NodeKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub theme: Theme,
}

/// A "new file" / "new folder" request waiting for its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
}

/// Where a new node goes, given the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionTarget {
    pub parent: Option<NodeId>,
    /// Folder that must be expanded so the new node is visible.
    pub expand: Option<NodeId>,
}

/// Selected folder: inside it. Selected file: next to it, under its parent (or the root).
/// Nothing selected, or a stale selection: the root.
pub fn insertion_target(forest: &Forest, selected: Option<&NodeId>) -> InsertionTarget {
    let Some(node) = selected.and_then(|id| forest.find_node_by_id(id)) else {
        return InsertionTarget {
            parent: None,
            expand: None,
        };
    };

    match node {
        FileNode::Folder(folder) => InsertionTarget {
            parent: Some(folder.id.clone()),
            expand: Some(folder.id.clone()),
        },
        FileNode::File(file) => InsertionTarget {
            parent: forest.find_parent_node(&file.id).map(|p| p.id().clone()),
            expand: None,
        },
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    expanded: FxHashSet<NodeId>,
    pub creating: Option<PendingCreate>,
}

impl ExplorerState {
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded(&self) -> &FxHashSet<NodeId> {
        &self.expanded
    }

    pub fn expand(&mut self, id: NodeId) -> bool {
        self.expanded.insert(id)
    }

    pub fn toggle(&mut self, id: NodeId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn rows(&self, forest: &Forest) -> Vec<FileTreeRow> {
        forest.flatten_for_view(&self.expanded)
    }
}

#[derive(Debug, Clone)]
pub struct PreviewState {
    pub live: bool,
    debounce: Debouncer<String>,
    code: String,
}

impl PreviewState {
    pub fn new(delay: Duration, live: bool) -> Self {
        Self {
            live,
            debounce: Debouncer::new(delay),
            code: String::new(),
        }
    }

    /// Last value that made it through the debounce.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn debounce(&self) -> &Debouncer<String> {
        &self.debounce
    }

    pub(crate) fn debounce_mut(&mut self) -> &mut Debouncer<String> {
        &mut self.debounce
    }

    pub(crate) fn set_code(&mut self, code: String) -> bool {
        if self.code == code {
            return false;
        }
        self.code = code;
        true
    }

    /// A new active file starts its own stream: whatever the old file had pending is dropped.
    pub(crate) fn restart(&mut self, code: String) {
        if self.debounce.cancel().is_some() {
            tracing::debug!("dropped pending preview update on file switch");
        }
        self.code = code;
    }
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new(super::debounce::DEFAULT_DEBOUNCE_DELAY, false)
    }
}

/// What an active file contributes to the preview: only HTML is rendered.
pub fn preview_source(file: &FileEntry) -> &str {
    if file.language == Language::Html {
        &file.content
    } else {
        ""
    }
}

/// Active-file resolver: a folder or a missing id resolves to nothing.
pub fn resolve_active_file<'a>(
    forest: &'a Forest,
    active: Option<&NodeId>,
) -> Option<&'a FileEntry> {
    active
        .and_then(|id| forest.find_node_by_id(id))
        .and_then(FileNode::as_file)
}

pub struct AppState {
    pub forest: Forest,
    pub active_file_id: Option<NodeId>,
    pub selected_id: Option<NodeId>,
    pub explorer: ExplorerState,
    pub preview: PreviewState,
    pub ui: UiState,
    pub console: ConsoleState,
    pub gate: AccessGate,
    pub(crate) ids: NodeIdGenerator,
}

impl AppState {
    pub fn new(forest: Forest, settings: &Settings) -> Self {
        let active_file_id = settings
            .project
            .active_file
            .as_deref()
            .filter(|id| matches!(forest.find_node_by_id(id), Some(FileNode::File(_))))
            .map(NodeId::from);

        let mut explorer = ExplorerState::default();
        let mut cursor = active_file_id.clone();
        while let Some(parent) = cursor
            .as_ref()
            .and_then(|id| forest.find_parent_node(id))
            .map(|p| p.id().clone())
        {
            explorer.expand(parent.clone());
            cursor = Some(parent);
        }

        let mut preview = PreviewState::new(
            settings.preview.debounce_delay(),
            settings.preview.live_on_start,
        );
        if let Some(file) = resolve_active_file(&forest, active_file_id.as_ref()) {
            preview.restart(preview_source(file).to_string());
        }

        let ids = NodeIdGenerator::after_forest(&forest);

        let theme = if settings.theme.dark {
            Theme::Dark
        } else {
            Theme::Light
        };

        Self {
            forest,
            selected_id: None,
            ids,
            active_file_id,
            explorer,
            preview,
            ui: UiState { theme },
            console: ConsoleState::new(),
            gate: AccessGate::default(),
        }
    }

    pub fn active_file(&self) -> Option<&FileEntry> {
        resolve_active_file(&self.forest, self.active_file_id.as_ref())
    }

    /// Editor tab bar: the top-level files.
    pub fn tabs(&self) -> impl Iterator<Item = &FileEntry> {
        self.forest.root_files()
    }

    pub fn explorer_rows(&self) -> Vec<FileTreeRow> {
        self.explorer.rows(&self.forest)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
