//! Async runtime adapter: runs background work and sends messages back to the session.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::{AsyncRuntime, TickerGuard};
