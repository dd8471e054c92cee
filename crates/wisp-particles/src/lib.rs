//! Wisp Particles - Pooled timed-particle core
//!
//! The reusable machinery every effect is built from:
//! - Jittered event tickers (integer, float-seconds, and period-locked)
//!   that turn accumulating time into spawn events with sub-frame offsets
//! - An unbounded object pool for sprite leases
//! - The particle lifetime state machine with prewarm fast-forward
//! - One tagged-variant particle kind enum with pure interpolation shapes
//! - A seedable xorshift RNG for cosmetic jitter

pub mod curves;
pub mod life;
pub mod particle;
pub mod pool;
pub mod progress;
pub mod rand;
pub mod ticker;

pub use life::{Life, LifePhase};
pub use particle::{LaunchStyle, MoteMode, ParticleKind, ParticleSet};
pub use pool::Pool;
pub use progress::ProgressFloat;
pub use rand::EffectRng;
pub use ticker::{FloatTicker, IntTicker, PhaseTicker};
