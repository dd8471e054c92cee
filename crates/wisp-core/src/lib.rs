//! Wisp Core - Foundational types for the Wisp effects engine
//!
//! This crate provides the types every other Wisp crate depends on:
//! - `NodeId` - Stable sprite/anchor handles
//! - `Vec3`, `Color` - Spatial and color types for the 2D effect plane
//! - `RenderSink`, `Visual` - The injected rendering capability
//! - Error types and Result alias

mod error;
mod id;
mod sink;
mod types;

pub use error::{Result, WispError};
pub use id::NodeId;
pub use sink::{MemorySink, NodeRecord, RenderSink, Visual};
pub use types::{Color, Vec3};
