#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show the current preview document in a window of its own.
    OpenPreviewWindow { html: String },
}
