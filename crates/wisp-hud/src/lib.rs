//! Wisp HUD - Screen-space HUD effects
//!
//! - `CellRow` / `CellStyle` — refillable cell rows with transition and
//!   drip motes
//! - `BarWaves` — sine crests sweeping along a bar edge
//! - `SpiritRing` — phase-locked revolving mote spindles
//! - `Hud` — the `EffectSystem` tying them to the player snapshot

pub mod bar;
pub mod cell;
pub mod hud;
pub mod spirit;

pub use bar::BarWaves;
pub use cell::{CellRow, CellStyle, CellTarget};
pub use hud::Hud;
pub use spirit::SpiritRing;
