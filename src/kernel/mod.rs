//! Headless application core (state/action/effect).

pub mod action;
pub mod console;
pub mod debounce;
pub mod effect;
pub mod gate;
pub mod preview;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use console::{BottomPanelTab, ConsoleLine, ConsoleState};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_DELAY};
pub use effect::Effect;
pub use gate::AccessGate;
pub use preview::{PreviewError, PreviewRenderer, PreviewView, SandboxPolicy};
pub use state::{
    insertion_target, preview_source, resolve_active_file, AppState, ExplorerState,
    InsertionTarget, PendingCreate, PreviewState, Theme, UiState,
};
pub use store::{DispatchResult, Store};
