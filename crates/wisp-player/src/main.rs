//! Wisp Player - headless demo driver
//!
//! Runs every effect system against a scripted session: the player walks
//! a sine path, channels a heal, double-jumps, and wanders into darkness,
//! while the HUD tracks scripted health and energy. Everything draws into
//! a MemorySink and the run ends with a draw summary.

use anyhow::{Context as _, Result};
use clap::Parser;
use log::info;
use wisp_audio::{Cue, CueOverrides, OverridingCueSource, StaticCueBank};
use wisp_core::MemorySink;
use wisp_effects::{Companion, FocusSparkles, JumpWave, LanternGlow};
use wisp_hud::Hud;
use wisp_runtime::{EffectSystem, FrameClock, HostContext, HostEvent, Settings};

#[derive(Parser)]
#[command(name = "wisp-player")]
#[command(about = "Drive the Wisp effect systems through a scripted headless session")]
#[command(version)]
struct Cli {
    /// Frames to simulate at 60 Hz
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Seed shared (offset per system) by all effect RNGs
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u32,

    /// Settings TOML file; defaults apply when omitted
    #[arg(long)]
    settings: Option<std::path::PathBuf>,
}

const DT: f32 = 1.0 / 60.0;

/// Scripted player motion and gameplay beats for one frame
fn script_frame(t: f32, ctx: &mut HostContext) -> Vec<HostEvent> {
    let mut events = Vec::new();

    // Sine stroll with matching velocity
    let walk_x = 10.0 * (t * 0.4).sin();
    ctx.player.x_velocity = 10.0 * 0.4 * (t * 0.4).cos();
    ctx.player.position.x = walk_x;
    ctx.player.facing = if ctx.player.x_velocity >= 0.0 { 1.0 } else { -1.0 };

    // Darkness window with the lantern in hand
    ctx.player.has_lantern = true;
    ctx.player.darkness_level = if (4.0..8.0).contains(&t) { 2 } else { 0 };

    // Energy drains while the heal channel runs, health comes back
    if (5.0..6.0).contains(&t) {
        ctx.player.energy = ctx.player.energy.saturating_sub(1);
        if t >= 5.5 {
            ctx.player.health = ctx.player.max_health.min(ctx.player.health + 1);
        }
    }

    let frame = (t / DT).round() as u32;
    if frame == (5.0 / DT) as u32 {
        events.push(HostEvent::FocusStarted);
    }
    if frame == (6.0 / DT) as u32 {
        events.push(HostEvent::FocusEnded);
    }
    if frame == (3.0 / DT) as u32 || frame == (7.0 / DT) as u32 {
        events.push(HostEvent::DoubleJump {
            x_velocity: ctx.player.x_velocity,
        });
    }
    events
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Settings::from_toml_str(&text)?
        }
        None => Settings::default(),
    };

    let mut ctx = HostContext::new(settings);
    ctx.skin_active = true;
    ctx.player.health = 3;
    ctx.player.max_health = 5;
    ctx.player.energy = 66;
    ctx.player.max_energy = 99;

    let mut sink = MemorySink::new();
    let mut systems: Vec<Box<dyn EffectSystem>> = vec![
        Box::new(Companion::new(cli.seed)),
        Box::new(LanternGlow::new(cli.seed.wrapping_add(1))?),
        Box::new(FocusSparkles::new(cli.seed.wrapping_add(2))?),
        Box::new(JumpWave::new()),
        Box::new(Hud::new(cli.seed.wrapping_add(3))?),
    ];
    for system in &mut systems {
        system
            .initialize(&ctx, &mut sink)
            .with_context(|| format!("initializing {}", system.name()))?;
    }

    let cue_table: toml::value::Table = toml::from_str(
        r#"
dash = "wisp_dash"
shadow_dash = "wisp_shadow_dash"
sharp_shadow_dash = "wisp_sharp_shadow_dash"
double_jump = "wisp_flap"
collect = "wisp_chime"
"#,
    )?;
    let cues = OverridingCueSource::new(StaticCueBank::vanilla(), CueOverrides::from_toml(&cue_table)?);

    let mut clock = FrameClock::new();
    for frame in 0..cli.frames {
        let t = frame as f32 * DT;
        let events = script_frame(t, &mut ctx);
        for event in &events {
            if let HostEvent::DoubleJump { .. } = event {
                info!("t={t:.2}: double jump -> cue '{}'", cues.resolve(Cue::DoubleJump, &ctx));
            }
            for system in &mut systems {
                system.handle_event(event, &ctx);
            }
        }

        clock.step(DT as f64);
        for system in &mut systems {
            system
                .update(&ctx, clock.dt(), &mut sink)
                .with_context(|| format!("updating {}", system.name()))?;
        }
    }

    println!(
        "simulated {} frames ({:.1}s): {} nodes, {} visible, {} draws",
        cli.frames,
        clock.total_time,
        sink.node_count(),
        sink.visible_count(),
        sink.total_draws()
    );
    for name in ["companion_puff", "halo_gleam", "heal_sparkle", "jump_wave", "cell_mote", "spirit_mote"] {
        let created = sink.nodes_named(name).count();
        let drawn: u64 = sink.nodes_named(name).map(|n| n.draw_count).sum();
        println!("  {name}: {created} pooled sprites, {drawn} draws");
    }
    Ok(())
}
