//! User-facing settings

use serde::{Deserialize, Serialize};
use wisp_core::Result;

/// Toggles for the individual effect groups.
///
/// The host persists these; the engine only reads them. Everything
/// defaults to on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display name reported for the active skin
    pub skin_name: String,
    /// Replace the vanilla HUD with the cell/spirit HUD
    pub enable_hud: bool,
    /// Show the animated companion orb and its trail
    pub enable_companion: bool,
    /// Substitute collection sound cues
    pub enable_collect_cues: bool,
    /// Substitute movement sound cues (dash, double jump)
    pub enable_movement_cues: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin_name: "Wisp".to_string(),
            enable_hud: true,
            enable_companion: true,
            enable_collect_cues: true,
            enable_movement_cues: true,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document; missing fields keep defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
