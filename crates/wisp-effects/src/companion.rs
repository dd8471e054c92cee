//! The companion orb
//!
//! Hovers on a slow sine path near the player, accelerates toward its
//! target with an exact braking distance, and sheds a trail whose spawn
//! budget is driven by both distance moved and time passed — several
//! trail puffs can be owed within one frame, each launched with the
//! prewarm offset that places it correctly along the frame's path.

use log::info;
use wisp_core::{NodeId, RenderSink, Result, Vec3, Visual};
use wisp_particles::{EffectRng, LaunchStyle, ParticleKind, ParticleSet};
use wisp_runtime::{EffectSystem, HostContext, HostEvent};

const BODY_SCALE: f32 = 0.6;
const ACCEL: f32 = 23.5;
const MAX_SPEED: f32 = 60.0;
const MAX_BRAKE_DISTANCE: f32 = MAX_SPEED * MAX_SPEED / (2.0 * ACCEL);
const MAX_IDLE_VELOCITY: f32 = 5.0;

const Y_OFFSET: f32 = 0.4;
const Y_RANGE: f32 = 0.15;
const Y_PERIOD: f32 = 1.25;
const X_RANGE: f32 = 0.85;
const X_PERIOD: f32 = 3.15;
const Z_OFFSET: f32 = -0.02;

// Trail
const TRAIL_LIFETIME: f32 = 0.65;
const TRAIL_NOISE: f32 = 0.25;
const TRAIL_Z_OFFSET: f32 = -0.01;
const VEL_MULTIPLIER: f32 = 0.1;
const VEL_CAP: f32 = 2.5;
const DIST_MAX: f32 = 0.075;
const TIME_MAX: f32 = 0.15;

const ROTATE_INTERVAL: f32 = 0.15;
const WAIT_FRAMES: u32 = 2;

pub struct Companion {
    body: Option<NodeId>,
    rng: EffectRng,
    trail: ParticleSet,

    position: Vec3,
    prev_velocity: Vec3,
    prev_target: Vec3,
    x_timer: f32,
    y_timer: f32,
    rotation: f32,
    rotate_timer: f32,
    /// Fraction of the next trail puff already earned by motion/time
    budget_progress: f32,
    waited: u32,
}

impl Companion {
    pub fn new(seed: u32) -> Self {
        Self {
            body: None,
            rng: EffectRng::new(seed),
            trail: ParticleSet::new("companion_puff"),
            position: Vec3::ZERO,
            prev_velocity: Vec3::ZERO,
            prev_target: Vec3::ZERO,
            x_timer: 0.0,
            y_timer: 0.0,
            rotation: 0.0,
            rotate_timer: 0.0,
            budget_progress: 0.0,
            waited: 0,
        }
    }

    pub fn trail_count(&self) -> usize {
        self.trail.active_count()
    }

    fn hover_center(ctx: &HostContext) -> Vec3 {
        ctx.player.position + Vec3::new(0.0, Y_OFFSET, Z_OFFSET)
    }

    /// Next point on the sine hover path, speed-clamped and dragged back
    /// inside the hover bounds
    fn compute_new_target(&mut self, ctx: &HostContext, dt: f32) -> Vec3 {
        self.x_timer += dt;
        self.y_timer += dt;
        if self.x_timer > X_PERIOD {
            self.x_timer -= X_PERIOD;
        }
        if self.y_timer > Y_PERIOD {
            self.y_timer -= Y_PERIOD;
        }

        let center = Self::hover_center(ctx);
        let new_x = center.x + X_RANGE * (self.x_timer * std::f32::consts::TAU / X_PERIOD).sin();
        let new_y = center.y + Y_RANGE * (self.y_timer * std::f32::consts::TAU / Y_PERIOD).cos();
        let mut target = Vec3::new(new_x, new_y, Z_OFFSET);

        let diff = target - self.prev_target;
        if diff.sq_length() > MAX_IDLE_VELOCITY * MAX_IDLE_VELOCITY {
            target = self.prev_target + diff.normalized() * MAX_IDLE_VELOCITY;
        }

        target.x = target.x.clamp(center.x - X_RANGE, center.x + X_RANGE);
        target.y = target.y.clamp(center.y - Y_RANGE, center.y + Y_RANGE);
        target
    }

    fn compute_target_velocity(&self, target: Vec3) -> Vec3 {
        let dist = target - self.position;
        let mag = dist.length();
        if mag <= 1e-6 {
            return Vec3::ZERO;
        }
        if mag >= MAX_BRAKE_DISTANCE {
            return dist.normalized() * MAX_SPEED;
        }
        // d = v^2 / 2a  ->  v = sqrt(2ad)
        dist.normalized() * (2.0 * ACCEL * mag).sqrt()
    }

    fn launch_puff(&mut self, pos: Vec3, drift: Vec3, prewarm: f32, sink: &mut dyn RenderSink) {
        let noise_arm = (self.rng.range(0.0, TRAIL_NOISE * TRAIL_NOISE)).sqrt();
        let angle = self.rng.angle();
        let start = (pos + Vec3::new(noise_arm, 0.0, 0.0).rotate_z(angle)).with_z(TRAIL_Z_OFFSET);

        self.trail.launch(
            ParticleKind::Streak {
                start,
                end: start + drift,
                init_scale: 1.0,
            },
            TRAIL_LIFETIME,
            prewarm,
            LaunchStyle::default(),
            sink,
        );
    }

    /// Move along `velocity` for `time`, spending the trail budget as it
    /// accrues; each puff owed mid-frame launches prewarmed to its offset.
    fn travel(&mut self, velocity: Vec3, time: f32, sink: &mut dyn RenderSink) {
        let dist = velocity * time;
        let final_pos = self.position + dist;
        if time <= 0.0 {
            return;
        }

        let mut budget = dist.length() / DIST_MAX + time / TIME_MAX;
        let rate = budget / time;
        let mut pos = self.position;
        let mut elapsed = 0.0;

        loop {
            let rem = 1.0 - self.budget_progress;
            if budget >= rem {
                budget -= rem;
                self.budget_progress = 0.0;

                let time_delta = rem / rate;
                elapsed += time_delta;
                pos += velocity * time_delta;

                let mut drift = velocity * VEL_MULTIPLIER;
                if drift.length() > VEL_CAP {
                    drift = drift.normalized() * VEL_CAP;
                }
                self.launch_puff(pos, drift, elapsed, sink);
            } else {
                self.budget_progress += budget;
                break;
            }
        }

        self.position = final_pos;
    }

    fn accelerate_to(&mut self, target: Vec3, dt: f32, sink: &mut dyn RenderSink) {
        let target_vel = self.compute_target_velocity(target);
        let diff = target_vel - self.prev_velocity;
        let new_velocity = if diff.length() <= ACCEL * dt {
            target_vel
        } else {
            self.prev_velocity + diff.normalized() * ACCEL * dt
        };

        let velocity = (new_velocity + self.prev_velocity) / 2.0;
        self.travel(velocity, dt, sink);
        self.prev_velocity = new_velocity;
    }

    /// Sit out the first frames so the host has a settled player position,
    /// then snap to it
    fn wait_frames(&mut self, ctx: &HostContext) -> bool {
        if self.waited == WAIT_FRAMES + 1 {
            return true;
        }
        self.waited += 1;
        if self.waited <= WAIT_FRAMES {
            false
        } else {
            self.prev_target = ctx.player.position;
            self.position = Self::hover_center(ctx);
            true
        }
    }

    fn do_rotate(&mut self, dt: f32) {
        self.rotate_timer += dt;
        if self.rotate_timer < ROTATE_INTERVAL {
            return;
        }
        while self.rotate_timer >= ROTATE_INTERVAL {
            self.rotate_timer -= ROTATE_INTERVAL;
        }
        self.rotation = self.rng.angle();
    }
}

impl EffectSystem for Companion {
    fn initialize(&mut self, _ctx: &HostContext, sink: &mut dyn RenderSink) -> Result<()> {
        let body = sink.create_sprite("companion_body");
        self.body = Some(body);
        info!("companion: body sprite ready");
        Ok(())
    }

    fn handle_event(&mut self, event: &HostEvent, _ctx: &HostContext) {
        if let HostEvent::SkinChanged { active: false } = event {
            // Re-settle when the skin comes back
            self.waited = 0;
            self.prev_velocity = Vec3::ZERO;
        }
    }

    fn update(&mut self, ctx: &HostContext, dt: f32, sink: &mut dyn RenderSink) -> Result<()> {
        // Particles already in flight finish regardless of toggles
        self.trail.advance(dt, sink);

        let enabled = ctx.skin_active && ctx.settings.enable_companion;
        if let Some(body) = self.body {
            sink.set_visible(body, enabled);
        }
        if !enabled {
            return Ok(());
        }
        if !self.wait_frames(ctx) {
            return Ok(());
        }

        let target = self.compute_new_target(ctx, dt);
        self.accelerate_to(target, dt, sink);
        self.prev_target = target;
        self.do_rotate(dt);

        if let Some(body) = self.body {
            sink.draw(
                body,
                &Visual {
                    position: self.position,
                    scale: Vec3::flat(BODY_SCALE),
                    rotation: self.rotation,
                    alpha: 1.0,
                },
            );
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "companion"
    }
}
