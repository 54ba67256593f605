use super::{Action, AppState, Effect};

mod editor;
mod explorer;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ExplorerSelect { .. }
            | Action::ExplorerToggleFolder { .. }
            | Action::ExplorerBeginCreate { .. }
            | Action::ExplorerCommitCreate { .. }
            | Action::ExplorerCancelCreate
            | Action::ExplorerRefresh => self.reduce_explorer_action(action),
            Action::Tick { .. }
            | Action::OpenFile { .. }
            | Action::EditorEdit { .. }
            | Action::SaveActiveFile
            | Action::ToggleLivePreview
            | Action::OpenPreviewInNewTab => self.reduce_editor_action(action),
            Action::BottomPanelSetTab { tab } => {
                let prev = self.state.console.active_tab;
                self.state.console.active_tab = tab;
                DispatchResult::changed(prev != tab)
            }
            Action::TerminalAppend { line } => {
                self.state.console.push_terminal(line);
                DispatchResult::changed(true)
            }
            Action::ToggleTheme => {
                self.state.ui.theme = self.state.ui.theme.toggled();
                DispatchResult::changed(true)
            }
            Action::IdentityResolved(result) => {
                if let Err(err) = &result {
                    tracing::warn!(error = %err, "identity check failed");
                }
                DispatchResult::changed(self.state.gate.resolve(result))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
