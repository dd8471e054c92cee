//! Wisp Audio - Sound-cue substitution
//!
//! Replaces clips at the moment they are consulted, never by rewriting the
//! host: the host asks [`OverridingCueSource::resolve`] for every cue and
//! gets either the configured replacement (skin active, group enabled) or
//! its own original clip.

pub mod bank;
pub mod cue;

pub use bank::{CueOverrides, OverridingCueSource, StaticCueBank};
pub use cue::{Cue, CueClass, CueSource};
