//! Sound cues
//!
//! A cue is a moment the host plays a sound for. The host asks a
//! [`CueSource`] which clip to use every time the moment occurs, so
//! swapping clips never touches the host's playback path.

/// The replaceable sound moments
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Dash,
    ShadowDash,
    SharpShadowDash,
    DoubleJump,
    Collect,
}

/// Settings group a cue belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueClass {
    Movement,
    Collect,
}

impl Cue {
    pub const ALL: [Cue; 5] = [
        Cue::Dash,
        Cue::ShadowDash,
        Cue::SharpShadowDash,
        Cue::DoubleJump,
        Cue::Collect,
    ];

    pub fn class(&self) -> CueClass {
        match self {
            Cue::Collect => CueClass::Collect,
            _ => CueClass::Movement,
        }
    }

    /// Config key for this cue
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Dash => "dash",
            Cue::ShadowDash => "shadow_dash",
            Cue::SharpShadowDash => "sharp_shadow_dash",
            Cue::DoubleJump => "double_jump",
            Cue::Collect => "collect",
        }
    }

    pub fn from_name(name: &str) -> Option<Cue> {
        Cue::ALL.into_iter().find(|cue| cue.name() == name)
    }
}

/// Capability answering "which clip plays for this cue right now"
pub trait CueSource {
    fn clip(&self, cue: Cue) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for cue in Cue::ALL {
            assert_eq!(Cue::from_name(cue.name()), Some(cue));
        }
        assert_eq!(Cue::from_name("warble"), None);
    }

    #[test]
    fn collect_is_its_own_class() {
        assert_eq!(Cue::Collect.class(), CueClass::Collect);
        assert_eq!(Cue::Dash.class(), CueClass::Movement);
        assert_eq!(Cue::DoubleJump.class(), CueClass::Movement);
    }
}
