//! Focus sparkles
//!
//! While the player channels a heal, sparkles spawn on a wide ring and
//! spiral in toward a point just above them. The quick-focus charm speeds
//! the whole effect up; deep focus slows it down and fattens the sparkles.

use log::debug;
use wisp_core::{RenderSink, Result, Vec3};
use wisp_particles::{EffectRng, FloatTicker, LaunchStyle, ParticleKind, ParticleSet};
use wisp_runtime::{EffectSystem, HostContext, HostEvent};

pub const QUICK_FOCUS_SPEEDUP: f32 = 1.75;
pub const DEEP_FOCUS_SLOWDOWN: f32 = 1.6;

const PARTICLE_RATE: f32 = 65.0;
const LIFETIME: f32 = 0.45;
const X_OFFSET: f32 = 0.27;
const Y_OFFSET: f32 = 0.38;

const SCALE_BASE: f32 = 1.8;
const DEEP_FOCUS_SCALE_BASE: f32 = 2.9;
const RADIUS_MIN: f32 = 3.5;
const RADIUS_MAX: f32 = 6.0;

pub struct FocusSparkles {
    rng: EffectRng,
    sparkles: ParticleSet,
    ticker: FloatTicker,
    focusing: bool,
}

impl FocusSparkles {
    pub fn new(seed: u32) -> Result<Self> {
        let mut rng = EffectRng::new(seed);
        let ticker = FloatTicker::new(0.8 / PARTICLE_RATE, 1.2 / PARTICLE_RATE, &mut rng)?;
        Ok(Self {
            rng,
            sparkles: ParticleSet::new("heal_sparkle"),
            ticker,
            focusing: false,
        })
    }

    pub fn sparkle_count(&self) -> usize {
        self.sparkles.active_count()
    }

    fn speedup(ctx: &HostContext) -> f32 {
        let mut speedup = 1.0;
        if ctx.player.quick_focus_equipped {
            speedup *= QUICK_FOCUS_SPEEDUP;
        }
        if ctx.player.deep_focus_equipped {
            speedup /= DEEP_FOCUS_SLOWDOWN;
        }
        speedup
    }

    fn launch_sparkle(&mut self, ctx: &HostContext, center: Vec3, prewarm: f32, sink: &mut dyn RenderSink) {
        let mut lifetime = LIFETIME;
        if ctx.player.quick_focus_equipped {
            lifetime /= QUICK_FOCUS_SPEEDUP;
        }
        if ctx.player.deep_focus_equipped {
            lifetime *= DEEP_FOCUS_SLOWDOWN;
        }

        let radius = self.rng.range(RADIUS_MIN, RADIUS_MAX);
        let spawn = center + Vec3::new(radius, 0.0, 0.0).rotate_z(self.rng.angle());
        let scale_base = if ctx.player.deep_focus_equipped {
            DEEP_FOCUS_SCALE_BASE
        } else {
            SCALE_BASE
        };

        self.sparkles.launch(
            ParticleKind::Sparkle {
                center,
                spawn,
                rot_base: self.rng.angle(),
                scale_base,
            },
            lifetime,
            prewarm,
            LaunchStyle::default(),
            sink,
        );
    }
}

impl EffectSystem for FocusSparkles {
    fn initialize(&mut self, _ctx: &HostContext, _sink: &mut dyn RenderSink) -> Result<()> {
        Ok(())
    }

    fn handle_event(&mut self, event: &HostEvent, _ctx: &HostContext) {
        match event {
            HostEvent::FocusStarted => {
                debug!("focus: sparkles on");
                self.focusing = true;
            }
            HostEvent::FocusEnded | HostEvent::SkinChanged { active: false } => {
                self.focusing = false;
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &HostContext, dt: f32, sink: &mut dyn RenderSink) -> Result<()> {
        self.sparkles.advance(dt, sink);

        if !self.focusing || !ctx.skin_active {
            return Ok(());
        }

        let center = ctx.player.position
            + Vec3::new(X_OFFSET * ctx.player.facing.signum(), Y_OFFSET, 0.0);

        // The ticker runs in sped-up time; prewarm maps back to real time
        let speedup = Self::speedup(ctx);
        for elapsed in self.ticker.tick(dt * speedup, &mut self.rng) {
            self.launch_sparkle(ctx, center, elapsed / speedup, sink);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "focus"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_core::MemorySink;
    use wisp_runtime::Settings;

    fn active_ctx() -> HostContext {
        let mut ctx = HostContext::new(Settings::default());
        ctx.skin_active = true;
        ctx
    }

    fn run_frames(fx: &mut FocusSparkles, ctx: &HostContext, sink: &mut MemorySink, frames: u32) {
        for _ in 0..frames {
            fx.update(ctx, 1.0 / 60.0, sink).unwrap();
        }
    }

    #[test]
    fn idle_until_focus_starts() {
        let ctx = active_ctx();
        let mut sink = MemorySink::new();
        let mut fx = FocusSparkles::new(21).unwrap();

        run_frames(&mut fx, &ctx, &mut sink, 30);
        assert_eq!(fx.sparkle_count(), 0);

        fx.handle_event(&HostEvent::FocusStarted, &ctx);
        run_frames(&mut fx, &ctx, &mut sink, 30);
        assert!(fx.sparkle_count() > 15);

        fx.handle_event(&HostEvent::FocusEnded, &ctx);
        run_frames(&mut fx, &ctx, &mut sink, 60);
        assert_eq!(fx.sparkle_count(), 0, "all sparkles expired after the channel");
    }

    #[test]
    fn quick_focus_spawns_faster() {
        let ctx = active_ctx();
        let mut quick_ctx = active_ctx();
        quick_ctx.player.quick_focus_equipped = true;

        let mut sink = MemorySink::new();
        let mut plain = FocusSparkles::new(33).unwrap();
        let mut quick = FocusSparkles::new(33).unwrap();
        plain.handle_event(&HostEvent::FocusStarted, &ctx);
        quick.handle_event(&HostEvent::FocusStarted, &quick_ctx);

        // Count spawns over a window much shorter than either lifetime
        run_frames(&mut plain, &ctx, &mut sink, 12);
        run_frames(&mut quick, &quick_ctx, &mut sink, 12);
        assert!(
            quick.sparkle_count() > plain.sparkle_count(),
            "quick {} vs plain {}",
            quick.sparkle_count(),
            plain.sparkle_count()
        );
    }

    #[test]
    fn skin_toggle_cuts_the_channel() {
        let ctx = active_ctx();
        let mut sink = MemorySink::new();
        let mut fx = FocusSparkles::new(44).unwrap();
        fx.handle_event(&HostEvent::FocusStarted, &ctx);
        fx.handle_event(&HostEvent::SkinChanged { active: false }, &ctx);
        run_frames(&mut fx, &ctx, &mut sink, 30);
        assert_eq!(fx.sparkle_count(), 0);
    }
}
