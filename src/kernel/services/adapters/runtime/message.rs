use crate::kernel::services::ports::{Identity, IdentityError};
use std::time::Instant;

pub enum AppMessage {
    Tick { now: Instant },
    IdentityResolved(Result<Identity, IdentityError>),
}
