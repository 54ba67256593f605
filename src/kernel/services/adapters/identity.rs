use crate::kernel::services::ports::{Identity, IdentityError, IdentityFuture, IdentityProvider};

/// Treats the logged-in OS user as the signed-in identity.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity {
    user: Option<String>,
}

impl LocalIdentity {
    pub fn from_env() -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok();
        Self { user }
    }

    pub fn with_user(user: Option<String>) -> Self {
        Self { user }
    }

    fn resolve(&self) -> Result<Identity, IdentityError> {
        let user = self
            .user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(IdentityError::Unauthenticated)?;
        Ok(Identity {
            user_id: user.to_string(),
            display_name: user.to_string(),
        })
    }
}

impl IdentityProvider for LocalIdentity {
    fn verify(&self) -> IdentityFuture {
        let result = self.resolve();
        Box::pin(async move { result })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/identity.rs"]
mod tests;
