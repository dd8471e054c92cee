//! Effect system trait

use crate::context::HostContext;
use crate::events::HostEvent;
use wisp_core::{RenderSink, Result};

/// A frame-stepped effect driven by the host loop
///
/// Systems are updated once per frame, in registration order, on one
/// thread. Events for a frame are delivered before that frame's update.
pub trait EffectSystem {
    /// Called once before the first frame; create sprites and anchors here
    fn initialize(&mut self, ctx: &HostContext, sink: &mut dyn RenderSink) -> Result<()>;

    /// React to a gameplay event
    fn handle_event(&mut self, event: &HostEvent, ctx: &HostContext);

    /// Advance by `dt` seconds and push this frame's visuals into the sink
    fn update(&mut self, ctx: &HostContext, dt: f32, sink: &mut dyn RenderSink) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
