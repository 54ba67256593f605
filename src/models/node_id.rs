//! 节点标识与生成器

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{FileNode, Forest};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(CompactString);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(CompactString::new(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(CompactString::from(value))
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// 基于时钟读数的 id 生成器
///
/// 取 Unix 毫秒时间戳；时钟没有前进（同一毫秒内多次创建或时钟回拨）时在上一个 id 上加一，
/// 因此同一个生成器产出的 id 严格递增。
#[derive(Debug, Default, Clone)]
pub struct NodeIdGenerator {
    last: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: SystemTime) -> NodeId {
        let millis = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let value = if millis > self.last {
            millis
        } else {
            self.last + 1
        };
        self.last = value;
        NodeId::from(value.to_string())
    }

    /// 从 `last` 之后继续编号
    pub fn resume_after(last: u64) -> Self {
        Self { last }
    }

    /// 已有森林里出现过的最大数字 id 之后继续编号，避免与载入的节点撞 id
    pub fn after_forest(forest: &Forest) -> Self {
        let mut last = 0;
        let mut stack: Vec<&FileNode> = forest.roots().iter().collect();
        while let Some(node) = stack.pop() {
            if let Ok(value) = node.id().parse::<u64>() {
                last = last.max(value);
            }
            stack.extend(node.children());
        }
        Self::resume_after(last)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/node_id.rs"]
mod tests;
