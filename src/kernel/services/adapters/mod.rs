//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod identity;
pub mod paths;
pub mod runtime;
pub mod settings;

pub use identity::LocalIdentity;
pub use paths::{ensure_log_dir, get_log_dir, get_preview_dir};
pub use runtime::{AppMessage, AsyncRuntime, TickerGuard};
pub use settings::{
    apply_env_overrides, ensure_settings_file, get_settings_path, load_settings,
    load_settings_from, SettingsError,
};
