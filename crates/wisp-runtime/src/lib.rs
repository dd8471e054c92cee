//! Wisp Runtime - Host-loop infrastructure
//!
//! Provides the glue between a host game loop and the effect crates:
//! - `FrameClock` — per-frame time source with stall clamping
//! - `HostContext` / `PlayerState` — the injected per-frame snapshot
//! - `Settings` — user toggles, parsed from TOML
//! - `HostEvent` — gameplay notifications forwarded by the host
//! - `EffectSystem` — trait for systems ticked by the loop

mod clock;
mod context;
mod events;
mod settings;
mod system;

pub use clock::FrameClock;
pub use context::{HostContext, PlayerState};
pub use events::HostEvent;
pub use settings::Settings;
pub use system::EffectSystem;
