//! Pooled timed particles and their interpolation kinds
//!
//! Every effect particle is one [`ParticleKind`] variant: an immutable
//! per-launch payload plus a pure function from lifetime progress to a
//! [`Visual`]. Emitters own a [`ParticleSet`] per effect, which pairs a
//! sprite-handle pool with the active list and runs the shared lifecycle:
//! launch (with prewarm fast-forward), per-frame advance, release on
//! expiry.

use crate::curves::{cosine_pulse, ease_out_quad, lerp_f32, sawtooth_fade, triangle};
use crate::life::{Life, LifePhase};
use crate::pool::Pool;
use log::debug;
use wisp_core::{Color, NodeId, RenderSink, Vec3, Visual};

/// Travel direction of a HUD cell mote relative to its cell center
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoteMode {
    /// Converges on the center (cell refilling)
    Inward,
    /// Scatters away from the center (cell draining)
    Outward,
    /// Falls from inside the cell (idle full cell)
    Drip,
}

/// Per-launch payload and interpolation shape for one particle
#[derive(Clone, Copy, Debug)]
pub enum ParticleKind {
    /// Trail puff shed by the companion in flight
    Streak {
        start: Vec3,
        end: Vec3,
        init_scale: f32,
    },
    /// Glint on the lantern glow's halo
    Gleam {
        base_scale: f32,
        start: Vec3,
        end: Vec3,
    },
    /// Heal sparkle spiraling in toward the focus point
    Sparkle {
        center: Vec3,
        spawn: Vec3,
        rot_base: f32,
        scale_base: f32,
    },
    /// HUD cell mote; position is local to the cell anchor
    CellMote {
        mode: MoteMode,
        angle: f32,
        spawn_radius: f32,
        drip: f32,
        scale_mult: f32,
    },
    /// Mote drifting outward along a rotating spindle; local to the ring
    SpiritMote { angle: f32, scale_mult: f32 },
    /// Sine crest sweeping along a bar edge; local to the bar anchor
    SineWave {
        target: Vec3,
        fade_split: f32,
        base_alpha: f32,
    },
    /// Expanding directional wave
    Shockwave {
        origin: Vec3,
        velocity: Vec3,
        angle: f32,
        scale_mult: f32,
    },
}

// Streak
const STREAK_FADE_SPLIT: f32 = 0.25;

// Gleam
const GLEAM_FULL_SCALE: f32 = 0.9;

// Sparkle
const SPARKLE_ALPHA_PEAK: f32 = 0.8;
const SPARKLE_REVOLUTIONS: f32 = 0.55;

// SpiritMote
const SPIRIT_SPAWN_RADIUS: f32 = 0.85;
const SPIRIT_FLIGHT_SPEED: f32 = 0.225;

// SineWave
const WAVE_SCALE_X: f32 = 0.45;
const WAVE_SCALE_Y: f32 = 1.25;

// Shockwave
const SHOCK_SCALE_START: f32 = 0.75;
const SHOCK_SCALE_END: f32 = 2.5;
const SHOCK_ALPHA_START: f32 = 0.75;

impl ParticleKind {
    /// The pure interpolation table: progress (via `life`) to draw state.
    /// Nothing here mutates anything.
    pub fn visual(&self, life: &Life) -> Visual {
        let p = life.progress();
        let r = life.remaining();
        match *self {
            ParticleKind::Streak {
                start,
                end,
                init_scale,
            } => Visual {
                position: start.lerp(end, ease_out_quad(p)),
                scale: Vec3::flat(init_scale * r),
                rotation: 0.0,
                alpha: sawtooth_fade(p, STREAK_FADE_SPLIT).sqrt(),
            },
            ParticleKind::Gleam {
                base_scale,
                start,
                end,
            } => {
                let pulse = cosine_pulse(p);
                Visual {
                    position: start.lerp(end, p),
                    scale: Vec3::flat(base_scale * GLEAM_FULL_SCALE * pulse),
                    rotation: 0.0,
                    alpha: pulse,
                }
            }
            ParticleKind::Sparkle {
                center,
                spawn,
                rot_base,
                scale_base,
            } => Visual {
                position: spawn.lerp(center, p),
                scale: Vec3::flat(scale_base * (1.0 + p) / 2.0),
                rotation: rot_base + SPARKLE_REVOLUTIONS * 360.0 * p,
                alpha: triangle(p, SPARKLE_ALPHA_PEAK),
            },
            ParticleKind::CellMote {
                mode,
                angle,
                spawn_radius,
                drip,
                scale_mult,
            } => {
                let radial = Vec3::new(spawn_radius, 0.0, 0.0).rotate_z(angle);
                let (start, end, travel) = match mode {
                    MoteMode::Inward => (radial, Vec3::ZERO, p.sqrt()),
                    MoteMode::Outward => (Vec3::ZERO, radial, p.sqrt()),
                    MoteMode::Drip => (radial, radial + Vec3::new(0.0, -drip, 0.0), p),
                };
                let alpha = match mode {
                    MoteMode::Inward => p.sqrt(),
                    MoteMode::Outward => r.sqrt(),
                    MoteMode::Drip => r,
                };
                let shape = match mode {
                    MoteMode::Drip => r.sqrt(),
                    _ => alpha,
                };
                Visual {
                    position: start.lerp(end, travel),
                    scale: Vec3::flat(shape * scale_mult),
                    rotation: 0.0,
                    alpha,
                }
            }
            ParticleKind::SpiritMote { angle, scale_mult } => {
                let arm = SPIRIT_SPAWN_RADIUS + SPIRIT_FLIGHT_SPEED * life.age();
                Visual {
                    position: Vec3::new(scale_mult * arm, 0.0, 0.0).rotate_z(angle),
                    scale: Vec3::flat(scale_mult * r.sqrt()),
                    rotation: 0.0,
                    alpha: r.sqrt(),
                }
            }
            ParticleKind::SineWave {
                target,
                fade_split,
                base_alpha,
            } => {
                let alpha = if p < fade_split {
                    base_alpha
                } else {
                    base_alpha * (1.0 - (p - fade_split) / (1.0 - fade_split))
                };
                Visual {
                    position: target * p,
                    scale: Vec3::new(
                        WAVE_SCALE_X,
                        WAVE_SCALE_Y * (0.1 + 0.9 * r.powf(0.65)),
                        1.0,
                    ),
                    rotation: 0.0,
                    alpha,
                }
            }
            ParticleKind::Shockwave {
                origin,
                velocity,
                angle,
                scale_mult,
            } => Visual {
                position: origin + velocity * life.age(),
                scale: Vec3::new(
                    scale_mult,
                    scale_mult * lerp_f32(SHOCK_SCALE_START, SHOCK_SCALE_END, p),
                    1.0,
                ),
                rotation: angle,
                alpha: lerp_f32(SHOCK_ALPHA_START, 0.0, p),
            },
        }
    }
}

/// One active particle: a leased sprite plus its life and kind
struct Particle {
    node: NodeId,
    life: Life,
    kind: ParticleKind,
}

impl Particle {
    fn visual(&self) -> Visual {
        self.kind.visual(&self.life)
    }
}

/// Extra launch options applied to the leased sprite
#[derive(Clone, Copy, Debug, Default)]
pub struct LaunchStyle {
    /// Anchor the particle moves relative to (HUD effects)
    pub parent: Option<NodeId>,
    /// Tint; None keeps whatever the sprite last had
    pub color: Option<Color>,
}

/// Pool plus active list for one effect's particles.
///
/// All particles in a set share one sprite image; their handles are
/// created through the sink on pool misses and kept forever after.
pub struct ParticleSet {
    sprite: String,
    pool: Pool<NodeId>,
    active: Vec<Particle>,
}

impl ParticleSet {
    pub fn new(sprite: &str) -> Self {
        Self {
            sprite: sprite.to_string(),
            pool: Pool::new(),
            active: Vec::new(),
        }
    }

    /// Lease a sprite and start a particle `prewarm` seconds into its
    /// lifetime, drawing it once at its fast-forwarded position.
    ///
    /// Returns false for an already-expired spawn: the lease bounces back
    /// to the pool and the sprite is never shown.
    pub fn launch(
        &mut self,
        kind: ParticleKind,
        lifetime: f32,
        prewarm: f32,
        style: LaunchStyle,
        sink: &mut dyn RenderSink,
    ) -> bool {
        let node = self.pool.acquire_with(|| {
            debug!("{}: growing pool", self.sprite);
            sink.create_sprite(&self.sprite)
        });
        let Some(life) = Life::begin(prewarm, lifetime) else {
            self.pool.release(node);
            return false;
        };

        sink.set_parent(node, style.parent);
        if let Some(color) = style.color {
            sink.set_color(node, color);
        }
        sink.set_visible(node, true);

        let particle = Particle { node, life, kind };
        sink.draw(node, &particle.visual());
        self.active.push(particle);
        true
    }

    /// Advance every active particle, drawing survivors and returning
    /// expired leases to the pool.
    pub fn advance(&mut self, dt: f32, sink: &mut dyn RenderSink) {
        let mut i = 0;
        while i < self.active.len() {
            match self.active[i].life.advance(dt) {
                LifePhase::Expired => {
                    let particle = self.active.swap_remove(i);
                    sink.set_visible(particle.node, false);
                    sink.set_parent(particle.node, None);
                    self.pool.release(particle.node);
                    // the swapped-in particle is checked next
                }
                LifePhase::Alive => {
                    let particle = &self.active[i];
                    sink.draw(particle.node, &particle.visual());
                    i += 1;
                }
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn idle_count(&self) -> usize {
        self.pool.idle_count()
    }
}
