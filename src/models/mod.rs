//! 数据模型层

pub mod file_tree;
pub mod language;
pub mod node_id;
pub mod templates;

pub use file_tree::{FileEntry, FileNode, FileTreeRow, FolderEntry, Forest, NodeKind};
pub use language::Language;
pub use node_id::{NodeId, NodeIdGenerator};
pub use templates::{seed_project, DEFAULT_ACTIVE_FILE, DEFAULT_EXPANDED_FOLDER};
