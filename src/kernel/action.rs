use std::time::Instant;

use super::console::BottomPanelTab;
use super::services::ports::{Identity, IdentityError};
use crate::models::{NodeId, NodeKind};

#[derive(Debug, Clone)]
pub enum Action {
    Tick {
        now: Instant,
    },
    /// Click in the explorer. `None` is a click on empty space.
    ExplorerSelect {
        id: Option<NodeId>,
    },
    ExplorerToggleFolder {
        id: NodeId,
    },
    ExplorerBeginCreate {
        kind: NodeKind,
    },
    ExplorerCommitCreate {
        name: String,
    },
    ExplorerCancelCreate,
    ExplorerRefresh,
    /// Click on an editor tab.
    OpenFile {
        id: NodeId,
    },
    EditorEdit {
        content: String,
        now: Instant,
    },
    SaveActiveFile,
    ToggleLivePreview,
    OpenPreviewInNewTab,
    BottomPanelSetTab {
        tab: BottomPanelTab,
    },
    TerminalAppend {
        line: String,
    },
    ToggleTheme,
    IdentityResolved(Result<Identity, IdentityError>),
}
