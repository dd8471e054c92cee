//! Wisp Effects - World-space companion effects
//!
//! Each effect is an `EffectSystem` the host ticks once per frame:
//! - `Companion` — the hovering orb and its motion-budget trail
//! - `LanternGlow` — the darkness halo and its disc gleams
//! - `FocusSparkles` — heal-channel sparkles, charm-scaled
//! - `JumpWave` — the double-jump shockwave

pub mod companion;
pub mod focus;
pub mod glow;
pub mod wave;

pub use companion::Companion;
pub use focus::FocusSparkles;
pub use glow::LanternGlow;
pub use wave::JumpWave;
