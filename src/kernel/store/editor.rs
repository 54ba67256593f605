use crate::kernel::state::preview_source;
use crate::kernel::{Action, Effect};
use crate::models::{FileNode, NodeId};

impl super::Store {
    pub(super) fn reduce_editor_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::Tick { now } => {
                let Some(code) = self.state.preview.debounce_mut().poll(now) else {
                    return super::DispatchResult::changed(false);
                };
                super::DispatchResult::changed(self.state.preview.set_code(code))
            }
            Action::OpenFile { id } => {
                if !matches!(self.state.forest.find_node_by_id(&id), Some(FileNode::File(_))) {
                    return super::DispatchResult::changed(false);
                }
                self.state.selected_id = Some(id.clone());
                self.set_active_file(id);
                super::DispatchResult::changed(true)
            }
            Action::EditorEdit { content, now } => {
                let Some(id) = self.state.active_file().map(|f| f.id.clone()) else {
                    return super::DispatchResult::changed(false);
                };

                self.state.forest = self.state.forest.update_node_content(&id, content);

                let source = self
                    .state
                    .active_file()
                    .map(|f| preview_source(f).to_string())
                    .unwrap_or_default();
                self.state.preview.debounce_mut().push(source, now);
                super::DispatchResult::changed(true)
            }
            Action::SaveActiveFile => {
                let name = self
                    .state
                    .active_file()
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                self.state.console.push_console(format!("File {name} saved"));
                super::DispatchResult::changed(true)
            }
            Action::ToggleLivePreview => {
                if self.state.active_file().is_none() {
                    return super::DispatchResult::changed(false);
                }
                let live = !self.state.preview.live;
                self.state.preview.live = live;
                self.state.console.push_console(if live {
                    "Live preview running"
                } else {
                    "Live preview paused"
                });
                super::DispatchResult::changed(true)
            }
            Action::OpenPreviewInNewTab => {
                if self.state.preview.code().is_empty() {
                    return super::DispatchResult::changed(false);
                }
                let html = self.state.preview.code().to_string();
                self.state
                    .console
                    .push_console("Opened live preview in new tab");
                super::DispatchResult {
                    effects: vec![Effect::OpenPreviewWindow { html }],
                    state_changed: true,
                }
            }
            _ => super::DispatchResult::changed(false),
        }
    }

    /// Switching files drops the old file's pending preview update and shows the new file's
    /// own content right away.
    pub(super) fn set_active_file(&mut self, id: NodeId) {
        if self.state.active_file_id.as_ref() == Some(&id) {
            return;
        }
        self.state.active_file_id = Some(id);
        let source = self
            .state
            .active_file()
            .map(|f| preview_source(f).to_string())
            .unwrap_or_default();
        self.state.preview.restart(source);
    }
}
