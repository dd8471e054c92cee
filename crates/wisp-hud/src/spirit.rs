//! Spirit ring
//!
//! Five spindles revolve around the currency counter, each shedding motes
//! that drift outward along the spindle's live angle. The spindle tickers
//! are phase-locked to the 14-second revolution so their long-run spawn
//! pattern never drifts against the rotation.

use wisp_core::{NodeId, RenderSink, Result};
use wisp_particles::{EffectRng, LaunchStyle, ParticleKind, ParticleSet, PhaseTicker};

const SPINDLES: usize = 5;
const REVOLUTION_TIME: f32 = 14.0;
const ROT_SPEED: f32 = 360.0 / REVOLUTION_TIME;
const PARTICLES_PER_SECOND: f32 = 4.5;
const MIN_TICKS: u32 = 110;
const MAX_TICKS: u32 = 140;

const FLIGHT_DISTANCE: f32 = 1.1;
const FLIGHT_SPEED: f32 = 0.225;
const FLIGHT_TIME: f32 = FLIGHT_DISTANCE / FLIGHT_SPEED;

fn ticks_per_revolution() -> u32 {
    (REVOLUTION_TIME * PARTICLES_PER_SECOND * (MIN_TICKS + MAX_TICKS) as f32 / 2.0) as u32
}

pub struct SpiritRing {
    motes: ParticleSet,
    spindles: Vec<PhaseTicker>,
    rotation: f32,
}

impl SpiritRing {
    pub fn new(rng: &mut EffectRng) -> Result<Self> {
        let mut spindles = Vec::with_capacity(SPINDLES);
        for _ in 0..SPINDLES {
            spindles.push(PhaseTicker::new(
                REVOLUTION_TIME,
                ticks_per_revolution(),
                MIN_TICKS,
                MAX_TICKS,
                rng,
            )?);
        }
        Ok(Self {
            motes: ParticleSet::new("spirit_mote"),
            spindles,
            rotation: 0.0,
        })
    }

    pub fn mote_count(&self) -> usize {
        self.motes.active_count()
    }

    /// Advance in-flight motes without spawning (ring hidden)
    pub fn settle(&mut self, dt: f32, sink: &mut dyn RenderSink) {
        self.motes.advance(dt, sink);
    }

    /// Advance the revolution and shed motes; `scale_mult` scales both the
    /// spawn ring and the motes themselves with the counter's size.
    pub fn update(
        &mut self,
        dt: f32,
        anchor: NodeId,
        scale_mult: f32,
        rng: &mut EffectRng,
        sink: &mut dyn RenderSink,
    ) {
        self.motes.advance(dt, sink);

        for (i, spindle) in self.spindles.iter_mut().enumerate() {
            let rot_base = self.rotation + i as f32 * 360.0 / SPINDLES as f32;
            for used in spindle.tick(dt, rng) {
                // Project the spindle forward to where it pointed when
                // this mote actually spawned
                let angle = rot_base + used * ROT_SPEED;
                self.motes.launch(
                    ParticleKind::SpiritMote { angle, scale_mult },
                    FLIGHT_TIME,
                    used,
                    LaunchStyle {
                        parent: Some(anchor),
                        color: None,
                    },
                    sink,
                );
            }
        }

        self.rotation += ROT_SPEED * dt;
        while self.rotation >= 360.0 {
            self.rotation -= 360.0;
        }
    }
}
