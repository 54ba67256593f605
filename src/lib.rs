//! codepad - 带实时预览的网页代码编辑器内核
//!
//! 模块结构：
//! - models: 数据模型（文件树森林、节点 id、语言推断、模板项目）
//! - kernel: 无界面的核心（state/action/effect、防抖、预览渲染、访问闸门、服务）
//! - app: 应用层（Session：消息泵、效果执行）

pub mod app;
pub mod kernel;
pub mod models;
