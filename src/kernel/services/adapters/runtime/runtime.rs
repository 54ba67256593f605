use super::message::AppMessage;
use crate::kernel::services::ports::IdentityProvider;
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

/// Keeps the tick task alive; dropping it stops the ticks.
pub struct TickerGuard {
    handle: JoinHandle<()>,
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn verify_identity(&self, provider: Arc<dyn IdentityProvider>) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = provider.verify().await;
            match &result {
                Ok(identity) => tracing::info!(user = %identity.user_id, "identity verified"),
                Err(e) => tracing::warn!(error = %e, "identity check failed"),
            }
            let _ = tx.send(AppMessage::IdentityResolved(result));
        });
    }

    pub fn spawn_ticker(&self, period: Duration) -> TickerGuard {
        let tx = self.tx.clone();
        let handle = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let now = Instant::now();
                if tx.send(AppMessage::Tick { now }).is_err() {
                    tracing::debug!("tick receiver gone, stopping ticker");
                    break;
                }
            }
        });
        TickerGuard { handle }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
