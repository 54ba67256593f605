//! 应用层：会话驱动

pub mod session;

pub use session::{Session, SessionError, DEFAULT_TICK_PERIOD};
