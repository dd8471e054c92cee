//! Double-jump shockwave
//!
//! One expanding wave per mid-air jump, tilted against the direction of
//! travel and flung out below the player.

use wisp_core::{RenderSink, Result, Vec3};
use wisp_particles::{LaunchStyle, ParticleKind, ParticleSet};
use wisp_runtime::{EffectSystem, HostContext, HostEvent};

const SPEED: f32 = 19.0;
const ANGLE_BASE: f32 = 17.0;
const SPAWN_OFFSET: f32 = 1.1;
const LIFETIME: f32 = 0.225;
const SCALE_MULT: f32 = 0.65;

fn wave_angle(x_velocity: f32) -> f32 {
    if x_velocity.abs() < 0.1 {
        0.0
    } else if x_velocity > 0.0 {
        -ANGLE_BASE
    } else {
        ANGLE_BASE
    }
}

pub struct JumpWave {
    waves: ParticleSet,
    pending: Vec<f32>,
}

impl JumpWave {
    pub fn new() -> Self {
        Self {
            waves: ParticleSet::new("jump_wave"),
            pending: Vec::new(),
        }
    }

    pub fn wave_count(&self) -> usize {
        self.waves.active_count()
    }
}

impl Default for JumpWave {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectSystem for JumpWave {
    fn initialize(&mut self, _ctx: &HostContext, _sink: &mut dyn RenderSink) -> Result<()> {
        Ok(())
    }

    fn handle_event(&mut self, event: &HostEvent, ctx: &HostContext) {
        if let HostEvent::DoubleJump { x_velocity } = event {
            if ctx.skin_active {
                self.pending.push(*x_velocity);
            }
        }
    }

    fn update(&mut self, ctx: &HostContext, dt: f32, sink: &mut dyn RenderSink) -> Result<()> {
        self.waves.advance(dt, sink);

        for x_velocity in self.pending.drain(..) {
            let angle = wave_angle(x_velocity);
            // The wave sprite points up; its flight direction is angle - 90
            let velocity = Vec3::new(SPEED, 0.0, 0.0).rotate_z(angle - 90.0);
            let origin = ctx.player.position + velocity.normalized() * SPAWN_OFFSET;

            self.waves.launch(
                ParticleKind::Shockwave {
                    origin,
                    velocity,
                    angle,
                    scale_mult: SCALE_MULT,
                },
                LIFETIME,
                0.0,
                LaunchStyle::default(),
                sink,
            );
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "wave"
    }
}
