//! The rendering capability boundary
//!
//! The effects engine never draws anything itself. Emitters push one
//! [`Visual`] per active particle per frame into a [`RenderSink`] supplied
//! by the host, which owns the actual sprites. [`MemorySink`] is the
//! in-memory implementation used by tests and headless runs.

use crate::id::NodeId;
use crate::types::{Color, Vec3};
use std::collections::HashMap;

/// Per-frame draw state for one sprite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub position: Vec3,
    pub scale: Vec3,
    /// Rotation in degrees around the z axis
    pub rotation: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: 0.0,
            alpha: 1.0,
        }
    }
}

/// Host-supplied rendering capability.
///
/// Sprites created here outlive the particles that use them; pooled
/// particles keep their sprite handle across reuse and only toggle
/// visibility. Positions of parented sprites are in parent-local space.
pub trait RenderSink {
    /// Create a hidden sprite for the named image asset
    fn create_sprite(&mut self, sprite: &str) -> NodeId;

    /// Create an invisible anchor node other sprites can be parented to
    fn create_anchor(&mut self, name: &str) -> NodeId;

    /// Attach a sprite to an anchor (or detach with None)
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>);

    /// Show or hide a sprite
    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Tint a sprite (alpha here is the base; `Visual::alpha` multiplies it)
    fn set_color(&mut self, node: NodeId, color: Color);

    /// Move an anchor node in world space
    fn place_anchor(&mut self, node: NodeId, position: Vec3);

    /// Push this frame's transform and opacity for one sprite
    fn draw(&mut self, node: NodeId, visual: &Visual);
}

/// Record of one node tracked by [`MemorySink`]
#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub name: String,
    pub parent: Option<NodeId>,
    pub visible: bool,
    pub color: Color,
    pub position: Vec3,
    pub last_visual: Option<Visual>,
    pub draw_count: u64,
}

/// A sink that records everything pushed into it
#[derive(Default)]
pub struct MemorySink {
    nodes: HashMap<NodeId, NodeRecord>,
    total_draws: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn visible_count(&self) -> usize {
        self.nodes.values().filter(|n| n.visible).count()
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    /// All nodes created for the given sprite/anchor name
    pub fn nodes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a NodeRecord> {
        self.nodes.values().filter(move |n| n.name == name)
    }

    fn insert(&mut self, name: &str) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(
            id,
            NodeRecord {
                name: name.to_string(),
                parent: None,
                visible: false,
                color: Color::WHITE,
                position: Vec3::ZERO,
                last_visual: None,
                draw_count: 0,
            },
        );
        id
    }
}

impl RenderSink for MemorySink {
    fn create_sprite(&mut self, sprite: &str) -> NodeId {
        self.insert(sprite)
    }

    fn create_anchor(&mut self, name: &str) -> NodeId {
        self.insert(name)
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.parent = parent;
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.visible = visible;
        }
    }

    fn set_color(&mut self, node: NodeId, color: Color) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.color = color;
        }
    }

    fn place_anchor(&mut self, node: NodeId, position: Vec3) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.position = position;
        }
    }

    fn draw(&mut self, node: NodeId, visual: &Visual) {
        self.total_draws += 1;
        if let Some(record) = self.nodes.get_mut(&node) {
            record.last_visual = Some(*visual);
            record.draw_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_records_draws() {
        let mut sink = MemorySink::new();
        let id = sink.create_sprite("puff");
        sink.set_visible(id, true);

        let visual = Visual {
            position: Vec3::new(1.0, 2.0, 0.0),
            alpha: 0.5,
            ..Default::default()
        };
        sink.draw(id, &visual);

        let record = sink.node(id).unwrap();
        assert_eq!(record.name, "puff");
        assert!(record.visible);
        assert_eq!(record.draw_count, 1);
        assert_eq!(record.last_visual.unwrap().alpha, 0.5);
        assert_eq!(sink.total_draws(), 1);
    }

    #[test]
    fn sink_tracks_parenting() {
        let mut sink = MemorySink::new();
        let anchor = sink.create_anchor("bar");
        let sprite = sink.create_sprite("wave");
        sink.set_parent(sprite, Some(anchor));
        assert_eq!(sink.node(sprite).unwrap().parent, Some(anchor));

        sink.set_parent(sprite, None);
        assert_eq!(sink.node(sprite).unwrap().parent, None);
    }
}
