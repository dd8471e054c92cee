//! Bar sine sweeps
//!
//! Crests drift along a bar edge on an exact cadence, alternating between
//! the up-phase and down-phase sprites so consecutive crests mesh into a
//! continuous sine ribbon.

use wisp_core::{Color, NodeId, RenderSink, Result, Vec3};
use wisp_particles::{EffectRng, FloatTicker, LaunchStyle, ParticleKind, ParticleSet};

const SPEED: f32 = 0.2;
const SPAN: f32 = 0.67;

pub struct BarWaves {
    up: ParticleSet,
    down: ParticleSet,
    ticker: FloatTicker,
    next_up: bool,
}

impl BarWaves {
    pub fn new(rng: &mut EffectRng) -> Result<Self> {
        Ok(Self {
            up: ParticleSet::new("sine_wave_up"),
            down: ParticleSet::new("sine_wave_down"),
            // One crest per SPAN of travel, exactly periodic
            ticker: FloatTicker::exact(SPAN / SPEED, rng)?,
            next_up: true,
        })
    }

    pub fn wave_count(&self) -> usize {
        self.up.active_count() + self.down.active_count()
    }

    /// Advance in-flight crests without spawning (bar hidden)
    pub fn settle(&mut self, dt: f32, sink: &mut dyn RenderSink) {
        self.up.advance(dt, sink);
        self.down.advance(dt, sink);
    }

    /// Advance and spawn crests along the bar at `anchor`, sweeping in
    /// `dir` (+1 right, -1 left), fully opaque for `fade_dist` and fading
    /// over the following `fade_length`.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        anchor: NodeId,
        dir: f32,
        fade_dist: f32,
        fade_length: f32,
        color: Color,
        rng: &mut EffectRng,
        sink: &mut dyn RenderSink,
    ) {
        self.up.advance(dt, sink);
        self.down.advance(dt, sink);

        let total = fade_dist + fade_length;
        let lifetime = total / SPEED;
        for elapsed in self.ticker.tick(dt, rng) {
            let kind = ParticleKind::SineWave {
                target: Vec3::new(dir * total, 0.0, 0.0),
                fade_split: fade_dist / total,
                base_alpha: color.a,
            };
            let style = LaunchStyle {
                parent: Some(anchor),
                color: Some(color),
            };
            let set = if self.next_up { &mut self.up } else { &mut self.down };
            set.launch(kind, lifetime, elapsed, style, sink);
            self.next_up = !self.next_up;
        }
    }
}
