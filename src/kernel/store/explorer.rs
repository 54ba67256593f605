use std::time::SystemTime;

use crate::kernel::state::{insertion_target, PendingCreate};
use crate::kernel::Action;
use crate::models::{FileEntry, FileNode, FolderEntry, NodeKind};

impl super::Store {
    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::ExplorerSelect { id } => {
                let Some(id) = id else {
                    let changed = self.state.selected_id.take().is_some();
                    return super::DispatchResult::changed(changed);
                };

                let kind = self.state.forest.find_node_by_id(&id).map(FileNode::kind);
                match kind {
                    Some(NodeKind::Folder) => {
                        self.state.explorer.toggle(id.clone());
                        self.state.selected_id = Some(id);
                    }
                    Some(NodeKind::File) => {
                        self.state.selected_id = Some(id.clone());
                        self.set_active_file(id);
                    }
                    None => return super::DispatchResult::changed(false),
                }
                super::DispatchResult::changed(true)
            }
            Action::ExplorerToggleFolder { id } => {
                if !self.state.forest.find_node_by_id(&id).is_some_and(FileNode::is_folder) {
                    return super::DispatchResult::changed(false);
                }
                self.state.explorer.toggle(id);
                super::DispatchResult::changed(true)
            }
            Action::ExplorerBeginCreate { kind } => {
                let target = insertion_target(&self.state.forest, self.state.selected_id.as_ref());
                if let Some(folder) = target.expand {
                    self.state.explorer.expand(folder);
                }
                self.state.explorer.creating = Some(PendingCreate {
                    kind,
                    parent: target.parent,
                });
                super::DispatchResult::changed(true)
            }
            Action::ExplorerCommitCreate { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return super::DispatchResult::changed(false);
                }
                let Some(pending) = self.state.explorer.creating.clone() else {
                    return super::DispatchResult::changed(false);
                };

                let id = self.state.ids.next(SystemTime::now());
                let node: FileNode = match pending.kind {
                    NodeKind::File => FileEntry::new(id.clone(), name).into(),
                    NodeKind::Folder => FolderEntry::new(id.clone(), name).into(),
                };
                tracing::info!(
                    id = %id,
                    name,
                    parent = pending.parent.as_deref().unwrap_or("<root>"),
                    "create node"
                );
                let taken = self.state.forest.contains(&id);
                let next = self.state.forest.add_node(node, pending.parent.as_deref());
                if taken || !next.contains(&id) {
                    tracing::warn!(id = %id, "create refused, request kept open");
                    return super::DispatchResult::changed(false);
                }
                self.state.forest = next;
                self.state.explorer.creating = None;
                super::DispatchResult::changed(true)
            }
            Action::ExplorerCancelCreate => {
                let changed = self.state.explorer.creating.take().is_some();
                super::DispatchResult::changed(changed)
            }
            Action::ExplorerRefresh => {
                self.state.console.push_console("Explorer refreshed");
                super::DispatchResult::changed(true)
            }
            _ => super::DispatchResult::changed(false),
        }
    }
}
