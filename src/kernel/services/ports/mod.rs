//! Service ports: traits + data contracts.

pub mod identity;
pub mod settings;

pub use identity::{Identity, IdentityError, IdentityFuture, IdentityProvider};
pub use settings::{PreviewSettings, ProjectSettings, Settings, ThemeSettings};
