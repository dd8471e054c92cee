//! Cue override bank
//!
//! A decorating [`CueSource`]: when the skin is active and the cue's
//! settings group is enabled, configured replacement clips answer;
//! everything else falls through to the host's own bank. Nothing is
//! patched — the host consults the same interface either way.

use crate::cue::{Cue, CueClass, CueSource};
use log::debug;
use std::collections::HashMap;
use wisp_core::{Result, WispError};
use wisp_runtime::HostContext;

/// Replacement clips keyed by cue, parsed from a `[cues]` TOML table
#[derive(Clone, Debug, Default)]
pub struct CueOverrides {
    clips: HashMap<Cue, String>,
}

impl CueOverrides {
    /// Parse a table like `dash = "wisp_dash"`. Unknown cue names are a
    /// configuration error, not a silent skip.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut clips = HashMap::new();
        for (key, value) in table {
            let cue = Cue::from_name(key)
                .ok_or_else(|| WispError::CueError(format!("unknown cue '{key}'")))?;
            let clip = value
                .as_str()
                .ok_or_else(|| WispError::CueError(format!("cue '{key}' needs a clip name")))?;
            clips.insert(cue, clip.to_string());
        }
        Ok(Self { clips })
    }

    pub fn get(&self, cue: Cue) -> Option<&str> {
        self.clips.get(&cue).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// A fixed clip-per-cue bank; stands in for the host's own source
#[derive(Clone, Debug)]
pub struct StaticCueBank {
    clips: HashMap<Cue, String>,
}

impl StaticCueBank {
    pub fn new(entries: &[(Cue, &str)]) -> Self {
        Self {
            clips: entries
                .iter()
                .map(|(cue, clip)| (*cue, clip.to_string()))
                .collect(),
        }
    }

    /// The host-default clip names, one per cue
    pub fn vanilla() -> Self {
        Self {
            clips: Cue::ALL
                .into_iter()
                .map(|cue| (cue, format!("vanilla_{}", cue.name())))
                .collect(),
        }
    }
}

impl CueSource for StaticCueBank {
    fn clip(&self, cue: Cue) -> &str {
        self.clips
            .get(&cue)
            .map(String::as_str)
            .unwrap_or("missing")
    }
}

/// The decorator the host queries instead of its own bank
pub struct OverridingCueSource<S: CueSource> {
    fallback: S,
    overrides: CueOverrides,
}

impl<S: CueSource> OverridingCueSource<S> {
    pub fn new(fallback: S, overrides: CueOverrides) -> Self {
        debug!("cues: {} override(s) loaded", overrides.len());
        Self {
            fallback,
            overrides,
        }
    }

    fn class_enabled(cue: Cue, ctx: &HostContext) -> bool {
        match cue.class() {
            CueClass::Movement => ctx.settings.enable_movement_cues,
            CueClass::Collect => ctx.settings.enable_collect_cues,
        }
    }

    /// The clip to play for `cue` this instant. Replacement only while the
    /// skin is active and the cue's group is enabled; the original clip
    /// otherwise.
    pub fn resolve(&self, cue: Cue, ctx: &HostContext) -> &str {
        if ctx.skin_active && Self::class_enabled(cue, ctx) {
            if let Some(clip) = self.overrides.get(cue) {
                return clip;
            }
        }
        self.fallback.clip(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_runtime::Settings;

    fn overrides() -> CueOverrides {
        let table: toml::value::Table = toml::from_str(
            r#"
dash = "wisp_dash"
double_jump = "wisp_flap"
collect = "wisp_chime"
"#,
        )
        .unwrap();
        CueOverrides::from_toml(&table).unwrap()
    }

    fn source() -> OverridingCueSource<StaticCueBank> {
        OverridingCueSource::new(StaticCueBank::vanilla(), overrides())
    }

    #[test]
    fn unknown_cue_key_is_rejected() {
        let table: toml::value::Table = toml::from_str("warble = \"x\"").unwrap();
        assert!(CueOverrides::from_toml(&table).is_err());
    }

    #[test]
    fn non_string_clip_is_rejected() {
        let table: toml::value::Table = toml::from_str("dash = 3").unwrap();
        assert!(CueOverrides::from_toml(&table).is_err());
    }

    #[test]
    fn inactive_skin_always_falls_back() {
        let ctx = HostContext::new(Settings::default());
        assert_eq!(source().resolve(Cue::Dash, &ctx), "vanilla_dash");
    }

    #[test]
    fn active_skin_takes_replacements() {
        let mut ctx = HostContext::new(Settings::default());
        ctx.skin_active = true;
        let source = source();
        assert_eq!(source.resolve(Cue::Dash, &ctx), "wisp_dash");
        assert_eq!(source.resolve(Cue::Collect, &ctx), "wisp_chime");
        // no override configured: original even while active
        assert_eq!(source.resolve(Cue::ShadowDash, &ctx), "vanilla_shadow_dash");
    }

    #[test]
    fn class_toggles_gate_independently() {
        let mut ctx = HostContext::new(Settings::default());
        ctx.skin_active = true;
        ctx.settings.enable_movement_cues = false;
        let source = source();
        assert_eq!(source.resolve(Cue::Dash, &ctx), "vanilla_dash");
        assert_eq!(source.resolve(Cue::Collect, &ctx), "wisp_chime");

        ctx.settings.enable_collect_cues = false;
        assert_eq!(source.resolve(Cue::Collect, &ctx), "vanilla_collect");
    }
}
