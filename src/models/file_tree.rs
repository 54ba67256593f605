//! 文件树数据模型
//!
//! 整个项目是一个有序森林。子节点序列放在 `Arc` 后面，修改时只复制从根到目标节点这条路径
//! （`Arc::make_mut`），其余子树与旧森林共享；调用方手里的旧值永远不会被原地修改。

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Language, NodeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub content: String,
    /// 只是携带，不参与任何逻辑
    #[serde(default)]
    pub breakpoints: Vec<u32>,
}

impl FileEntry {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            language: Language::from_file_name(&name),
            name,
            content: String::new(),
            breakpoints: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: Vec<u32>) -> Self {
        self.breakpoints = breakpoints;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub children: Arc<Vec<FileNode>>,
}

impl FolderEntry {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Arc::default(),
        }
    }

    pub fn with_children(mut self, children: Vec<FileNode>) -> Self {
        self.children = Arc::new(children);
        self
    }

    pub fn children(&self) -> &[FileNode] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File(FileEntry),
    Folder(FolderEntry),
}

impl FileNode {
    pub fn id(&self) -> &NodeId {
        match self {
            FileNode::File(file) => &file.id,
            FileNode::Folder(folder) => &folder.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FileNode::File(file) => &file.name,
            FileNode::Folder(folder) => &folder.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FileNode::File(_) => NodeKind::File,
            FileNode::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileNode::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            FileNode::File(file) => Some(file),
            FileNode::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderEntry> {
        match self {
            FileNode::Folder(folder) => Some(folder),
            FileNode::File(_) => None,
        }
    }

    pub fn children(&self) -> &[FileNode] {
        match self {
            FileNode::Folder(folder) => &folder.children,
            FileNode::File(_) => &[],
        }
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a NodeId>) {
        out.push(self.id());
        for child in self.children() {
            child.collect_ids(out);
        }
    }
}

impl From<FileEntry> for FileNode {
    fn from(value: FileEntry) -> Self {
        FileNode::File(value)
    }
}

impl From<FolderEntry> for FileNode {
    fn from(value: FolderEntry) -> Self {
        FileNode::Folder(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Arc<Vec<FileNode>>,
}

impl Forest {
    pub fn new(roots: Vec<FileNode>) -> Self {
        Self {
            roots: Arc::new(roots),
        }
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// 深度优先，只进入文件夹的子节点；返回第一个匹配
    pub fn find_node_by_id(&self, id: &str) -> Option<&FileNode> {
        find_in(&self.roots, id)
    }

    /// 返回直接子节点中含有 `id` 的文件夹；顶层节点没有父节点
    pub fn find_parent_node(&self, id: &str) -> Option<&FileNode> {
        parent_in(&self.roots, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_node_by_id(id).is_some()
    }

    /// 编辑器标签栏：按顺序列出顶层文件
    pub fn root_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.roots.iter().filter_map(FileNode::as_file)
    }

    /// `parent_id` 为 `None` 时追加到根序列，否则追加到该文件夹的子序列末尾。
    ///
    /// 父节点不存在或不是文件夹时静默忽略；新节点（或其任一后代）的 id 已经存在时同样忽略，
    /// 保证 id 唯一且森林无环。总是返回新的森林。
    pub fn add_node(&self, node: FileNode, parent_id: Option<&str>) -> Forest {
        let mut next = self.clone();

        let mut incoming = Vec::new();
        node.collect_ids(&mut incoming);
        if let Some(dup) = incoming.iter().find(|id| self.contains(id.as_str())) {
            tracing::warn!(id = %dup, "add_node ignored: id already in use");
            return next;
        }

        let Some(parent_id) = parent_id else {
            Arc::make_mut(&mut next.roots).push(node);
            return next;
        };

        let Some(path) = index_path(&self.roots, parent_id) else {
            tracing::debug!(parent = parent_id, "add_node ignored: parent not found");
            return next;
        };
        if !self.find_node_by_id(parent_id).is_some_and(FileNode::is_folder) {
            tracing::debug!(parent = parent_id, "add_node ignored: parent is not a folder");
            return next;
        }

        if let Some(FileNode::Folder(folder)) = node_at_mut(&mut next.roots, &path) {
            Arc::make_mut(&mut folder.children).push(node);
        }
        next
    }

    /// 只替换文件节点的内容；节点缺失或是文件夹时原样返回（仍然是新值）
    pub fn update_node_content(&self, id: &str, content: impl Into<String>) -> Forest {
        let mut next = self.clone();

        let Some(path) = index_path(&self.roots, id) else {
            return next;
        };
        if !matches!(self.find_node_by_id(id), Some(FileNode::File(_))) {
            return next;
        }

        if let Some(FileNode::File(file)) = node_at_mut(&mut next.roots, &path) {
            file.content = content.into();
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: String,
    pub kind: NodeKind,
    pub language: Option<Language>,
    pub is_expanded: bool,
}

impl Forest {
    pub fn flatten_for_view(&self, expanded: &FxHashSet<NodeId>) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(&FileNode, u16)> = self.roots.iter().rev().map(|n| (n, 0)).collect();

        while let Some((node, depth)) = stack.pop() {
            let is_expanded = node.is_folder() && expanded.contains(node.id());
            result.push(FileTreeRow {
                id: node.id().clone(),
                depth,
                name: node.name().to_string(),
                kind: node.kind(),
                language: node.as_file().map(|f| f.language),
                is_expanded,
            });

            if is_expanded {
                for child in node.children().iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }

        result
    }
}

fn find_in<'a>(nodes: &'a [FileNode], id: &str) -> Option<&'a FileNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn parent_in<'a>(nodes: &'a [FileNode], id: &str) -> Option<&'a FileNode> {
    for node in nodes {
        if let FileNode::Folder(folder) = node {
            if folder.children.iter().any(|child| child.id() == id) {
                return Some(node);
            }
            if let Some(found) = parent_in(&folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn index_path(nodes: &[FileNode], id: &str) -> Option<Vec<usize>> {
    fn walk(nodes: &[FileNode], id: &str, path: &mut Vec<usize>) -> bool {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            if node.id() == id || walk(node.children(), id, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    walk(nodes, id, &mut path).then_some(path)
}

fn node_at_mut<'a>(
    roots: &'a mut Arc<Vec<FileNode>>,
    path: &[usize],
) -> Option<&'a mut FileNode> {
    let (&first, rest) = path.split_first()?;
    let mut node = Arc::make_mut(roots).get_mut(first)?;
    for &index in rest {
        node = match node {
            FileNode::Folder(folder) => Arc::make_mut(&mut folder.children).get_mut(index)?,
            FileNode::File(_) => return None,
        };
    }
    Some(node)
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
