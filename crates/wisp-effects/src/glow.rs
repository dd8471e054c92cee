//! Lantern glow
//!
//! A halo that swells up around the player in full darkness and breathes
//! back down when the light returns, shedding gleams across its disc at a
//! rate that follows the halo's current size.

use log::info;
use wisp_core::{NodeId, RenderSink, Result, Vec3, Visual};
use wisp_particles::{EffectRng, FloatTicker, LaunchStyle, ParticleKind, ParticleSet, ProgressFloat};
use wisp_runtime::{EffectSystem, HostContext, HostEvent};

const OFFSET: Vec3 = Vec3::new(0.0, -0.45, 0.0);
const GROW_DURATION: f32 = 0.45;
const SHRINK_DURATION: f32 = 0.9;
const FULL_SCALE: f32 = 1.375;
const ROT_SPEED: f32 = 360.0 / 8.0;

const PARTICLE_RATE: f32 = 75.0;
const PARTICLE_LIFETIME: f32 = 0.45;
const PARTICLE_RADIUS: f32 = 3.2;
const PARTICLE_DIST_MIN: f32 = 0.5;
const PARTICLE_DIST_MAX: f32 = 0.7;
const PARTICLE_Z: f32 = -0.02;

/// Darkness level at which the lantern halo turns on
const FULL_DARKNESS: i32 = 2;

pub struct LanternGlow {
    halo: Option<NodeId>,
    rng: EffectRng,
    gleams: ParticleSet,
    ticker: FloatTicker,
    envelope: ProgressFloat,
    angle: f32,
}

impl LanternGlow {
    pub fn new(seed: u32) -> Result<Self> {
        let mut rng = EffectRng::new(seed);
        let ticker = FloatTicker::new(0.9 / PARTICLE_RATE, 1.1 / PARTICLE_RATE, &mut rng)?;
        Ok(Self {
            halo: None,
            rng,
            gleams: ParticleSet::new("halo_gleam"),
            ticker,
            envelope: ProgressFloat::new(0.0, 1.0 / GROW_DURATION, 1.0 / SHRINK_DURATION),
            angle: 0.0,
        })
    }

    pub fn gleam_count(&self) -> usize {
        self.gleams.active_count()
    }

    fn scale(&self) -> f32 {
        // Sine-eased 0..FULL_SCALE from the linear envelope
        let v = self.envelope.value();
        FULL_SCALE * (1.0 + ((v * 2.0 - 1.0) * std::f32::consts::FRAC_PI_2).sin()) / 2.0
    }

    fn launch_gleam(&mut self, center: Vec3, scale_ratio: f32, prewarm: f32, sink: &mut dyn RenderSink) {
        let radius = self.rng.disc_radius() * PARTICLE_RADIUS * scale_ratio;
        let spawn_angle = self.rng.angle();
        let drift_angle = self.rng.angle();
        let drift = Vec3::new(self.rng.range(PARTICLE_DIST_MIN, PARTICLE_DIST_MAX), 0.0, 0.0)
            .rotate_z(drift_angle);

        let spot = center + Vec3::new(radius, 0.0, 0.0).rotate_z(spawn_angle);
        let start = (spot - drift / 2.0).with_z(PARTICLE_Z);
        let end = (spot + drift / 2.0).with_z(PARTICLE_Z);

        self.gleams.launch(
            ParticleKind::Gleam {
                base_scale: scale_ratio,
                start,
                end,
            },
            PARTICLE_LIFETIME,
            prewarm,
            LaunchStyle::default(),
            sink,
        );
    }
}

impl EffectSystem for LanternGlow {
    fn initialize(&mut self, _ctx: &HostContext, sink: &mut dyn RenderSink) -> Result<()> {
        self.halo = Some(sink.create_sprite("lantern_halo"));
        info!("glow: halo sprite ready");
        Ok(())
    }

    fn handle_event(&mut self, _event: &HostEvent, _ctx: &HostContext) {}

    fn update(&mut self, ctx: &HostContext, dt: f32, sink: &mut dyn RenderSink) -> Result<()> {
        self.gleams.advance(dt, sink);

        let lit = ctx.skin_active
            && ctx.player.has_lantern
            && ctx.player.darkness_level == FULL_DARKNESS;
        self.envelope.advance(dt, if lit { 1.0 } else { 0.0 });

        let scale = self.scale();
        let scale_ratio = scale / FULL_SCALE;
        let center = ctx.player.position + OFFSET;

        self.angle += ROT_SPEED * dt;
        while self.angle >= 360.0 {
            self.angle -= 360.0;
        }

        if let Some(halo) = self.halo {
            sink.set_visible(halo, ctx.skin_active && scale > 1e-4);
            sink.draw(
                halo,
                &Visual {
                    position: center,
                    scale: Vec3::flat(scale),
                    rotation: self.angle,
                    alpha: 1.0,
                },
            );
        }

        // Spawn rate tracks the halo size; a hidden halo sheds nothing
        for elapsed in self.ticker.tick(dt * scale_ratio, &mut self.rng) {
            self.launch_gleam(center, scale_ratio, elapsed, sink);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "glow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_core::MemorySink;
    use wisp_runtime::Settings;

    fn dark_ctx() -> HostContext {
        let mut ctx = HostContext::new(Settings::default());
        ctx.skin_active = true;
        ctx.player.has_lantern = true;
        ctx.player.darkness_level = FULL_DARKNESS;
        ctx
    }

    #[test]
    fn halo_grows_in_darkness_and_fades_in_light() {
        let mut ctx = dark_ctx();
        let mut sink = MemorySink::new();
        let mut glow = LanternGlow::new(5).unwrap();
        glow.initialize(&ctx, &mut sink).unwrap();

        for _ in 0..60 {
            glow.update(&ctx, 1.0 / 60.0, &mut sink).unwrap();
        }
        assert!((glow.scale() - FULL_SCALE).abs() < 1e-3, "fully grown after 1s");

        ctx.player.darkness_level = 0;
        for _ in 0..120 {
            glow.update(&ctx, 1.0 / 60.0, &mut sink).unwrap();
        }
        assert!(glow.scale() < 1e-3, "fully shrunk after 2s of light");
    }

    #[test]
    fn full_halo_sheds_gleams_near_rate() {
        let ctx = dark_ctx();
        let mut sink = MemorySink::new();
        let mut glow = LanternGlow::new(6).unwrap();
        glow.initialize(&ctx, &mut sink).unwrap();

        // Grow to full, then count a second of spawning; lifetime 0.45s at
        // ~75/sec keeps roughly 30-40 alive
        for _ in 0..120 {
            glow.update(&ctx, 1.0 / 60.0, &mut sink).unwrap();
        }
        assert!(
            glow.gleam_count() > 25 && glow.gleam_count() < 45,
            "got {}",
            glow.gleam_count()
        );
    }

    #[test]
    fn no_lantern_means_no_halo() {
        let mut ctx = dark_ctx();
        ctx.player.has_lantern = false;
        let mut sink = MemorySink::new();
        let mut glow = LanternGlow::new(7).unwrap();
        glow.initialize(&ctx, &mut sink).unwrap();

        for _ in 0..60 {
            glow.update(&ctx, 1.0 / 60.0, &mut sink).unwrap();
        }
        assert_eq!(glow.gleam_count(), 0);
        assert!(glow.scale() < 1e-6);
    }
}
