use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("no signed-in user")]
    Unauthenticated,
    #[error("identity check unavailable: {0}")]
    Unavailable(String),
}

pub type IdentityFuture = Pin<Box<dyn Future<Output = Result<Identity, IdentityError>> + Send>>;

/// External collaborator that confirms who is using the editor. Retries and backoff are its
/// own business; the session only waits for the final answer.
pub trait IdentityProvider: Send + Sync {
    fn verify(&self) -> IdentityFuture;
}
