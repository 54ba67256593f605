use crate::kernel::services::ports::{Identity, IdentityError};

/// Nothing behind the gate is shown until the identity check has answered yes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessGate {
    #[default]
    Pending,
    Granted(Identity),
    Denied {
        reason: String,
    },
}

impl AccessGate {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Granted(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn resolve(&mut self, result: Result<Identity, IdentityError>) -> bool {
        let next = match result {
            Ok(identity) => Self::Granted(identity),
            Err(err) => Self::Denied {
                reason: err.to_string(),
            },
        };
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}
