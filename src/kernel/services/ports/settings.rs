use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::DEFAULT_ACTIVE_FILE;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub project: ProjectSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSettings {
    #[serde(default = "PreviewSettings::default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub live_on_start: bool,
}

impl PreviewSettings {
    fn default_debounce_ms() -> u64 {
        500
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
            live_on_start: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default)]
    pub dark: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default = "ProjectSettings::default_seed_templates")]
    pub seed_templates: bool,
    #[serde(default = "ProjectSettings::default_active_file")]
    pub active_file: Option<String>,
}

impl ProjectSettings {
    fn default_seed_templates() -> bool {
        true
    }

    fn default_active_file() -> Option<String> {
        Some(DEFAULT_ACTIVE_FILE.to_string())
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            seed_templates: Self::default_seed_templates(),
            active_file: Self::default_active_file(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
