//! Per-user display preferences

use serde::{Deserialize, Serialize};

/// Preferences kept apart from the game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Whether the settings panel is open
    pub is_changing_settings: bool,
    /// Set the first time the settings panel is closed
    pub has_completed_tutorial: bool,
}

impl UserSettings {
    /// Fresh users start with the settings panel open
    pub fn new() -> Self {
        Self {
            is_changing_settings: true,
            has_completed_tutorial: false,
        }
    }

    pub fn open_settings(&mut self) {
        self.is_changing_settings = true;
    }

    /// Close the settings panel; the first close completes the tutorial
    pub fn close_settings(&mut self) {
        self.is_changing_settings = false;
        if !self.has_completed_tutorial {
            tracing::info!("Settings tutorial completed");
            self.has_completed_tutorial = true;
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_settings_completes_tutorial_once() {
        let mut settings = UserSettings::default();
        assert!(settings.is_changing_settings);
        settings.close_settings();
        assert!(!settings.is_changing_settings);
        assert!(settings.has_completed_tutorial);

        settings.open_settings();
        assert!(settings.is_changing_settings);
        assert!(settings.has_completed_tutorial);
    }
}
