//! Kernel service layer: ports (traits + data contracts) and adapters (IO/async).

pub mod adapters;
pub mod ports;
