//! Preview view model and the host markup renderer.

use minijinja::{context, Environment};
use thiserror::Error;

use super::state::Theme;

const TEMPLATE_NAME: &str = "preview.html";
const TEMPLATE_SOURCE: &str = include_str!("../../assets/preview.html");

/// Capabilities granted to the inline preview document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    pub allow_scripts: bool,
    pub allow_same_origin: bool,
    pub allow_forms: bool,
    pub allow_popups: bool,
    pub allow_top_navigation: bool,
}

impl SandboxPolicy {
    /// Scripts run; storage, navigation, forms and popups stay locked.
    pub const PREVIEW: Self = Self {
        allow_scripts: true,
        allow_same_origin: false,
        allow_forms: false,
        allow_popups: false,
        allow_top_navigation: false,
    };

    /// Value of the iframe `sandbox` attribute. An empty value denies everything.
    pub fn attribute(&self) -> String {
        let flags = [
            (self.allow_scripts, "allow-scripts"),
            (self.allow_same_origin, "allow-same-origin"),
            (self.allow_forms, "allow-forms"),
            (self.allow_popups, "allow-popups"),
            (self.allow_top_navigation, "allow-top-navigation"),
        ];
        flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self::PREVIEW
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewView<'a> {
    /// Nothing to show yet.
    Placeholder,
    /// There is a document, but the live toggle is off.
    GoLive,
    Live { document: &'a str },
}

impl<'a> PreviewView<'a> {
    pub fn from_code(code: &'a str, live: bool) -> Self {
        if code.is_empty() {
            Self::Placeholder
        } else if !live {
            Self::GoLive
        } else {
            Self::Live { document: code }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::GoLive => "go_live",
            Self::Live { .. } => "live",
        }
    }
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("preview template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub struct PreviewRenderer {
    env: Environment<'static>,
    policy: SandboxPolicy,
}

impl PreviewRenderer {
    pub fn new() -> Result<Self, PreviewError> {
        Self::with_policy(SandboxPolicy::PREVIEW)
    }

    pub fn with_policy(policy: SandboxPolicy) -> Result<Self, PreviewError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        Ok(Self { env, policy })
    }

    pub fn policy(&self) -> SandboxPolicy {
        self.policy
    }

    /// Full re-render; nothing is cached between calls.
    pub fn render(&self, view: &PreviewView<'_>, theme: Theme) -> Result<String, PreviewError> {
        let document = match view {
            PreviewView::Live { document } => *document,
            _ => "",
        };
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let html = template.render(context! {
            kind => view.kind(),
            theme => theme.as_str(),
            sandbox => self.policy.attribute(),
            document => document,
        })?;
        Ok(html)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preview.rs"]
mod tests;
