//! Host context: the per-frame snapshot every effect reads
//!
//! The engine never reaches into the host game; the host refreshes this
//! snapshot once per frame and passes it by reference into every system.
//! There are no process-wide statics — a context is constructed at
//! subsystem start and dropped at teardown.

use crate::settings::Settings;
use wisp_core::Vec3;

/// What the effects need to know about the player this frame
#[derive(Clone, Debug)]
pub struct PlayerState {
    /// World position of the player sprite's origin
    pub position: Vec3,
    /// Horizontal velocity, world units per second
    pub x_velocity: f32,
    /// +1.0 facing right, -1.0 facing left
    pub facing: f32,
    /// Filled health cells
    pub health: u32,
    pub max_health: u32,
    /// Extra cells drawn in the lifeblood style
    pub lifeblood: u32,
    /// Current energy, in the same units the energy cells display (33 per cell)
    pub energy: u32,
    pub max_energy: u32,
    /// 0 = lit area, 2 = full darkness
    pub darkness_level: i32,
    pub has_lantern: bool,
    pub overcharmed: bool,
    pub quick_focus_equipped: bool,
    pub deep_focus_equipped: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            x_velocity: 0.0,
            facing: 1.0,
            health: 5,
            max_health: 5,
            lifeblood: 0,
            energy: 0,
            max_energy: 99,
            darkness_level: 0,
            has_lantern: false,
            overcharmed: false,
            quick_focus_equipped: false,
            deep_focus_equipped: false,
        }
    }
}

/// Everything injected into an effect system's update
#[derive(Clone, Debug, Default)]
pub struct HostContext {
    pub player: PlayerState,
    pub settings: Settings,
    /// Whether the skin (and so all of these effects) is currently selected
    pub skin_active: bool,
}

impl HostContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            player: PlayerState::default(),
            settings,
            skin_active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_starts_inactive() {
        let ctx = HostContext::new(Settings::default());
        assert!(!ctx.skin_active);
        assert_eq!(ctx.player.health, 5);
    }
}
