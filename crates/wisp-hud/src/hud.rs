//! The HUD system
//!
//! Maps the player snapshot onto cell-row targets, bar waves, and the
//! spirit ring, and owns their anchors. Life cells fill one per health
//! point, with lifeblood cells appended in their own color; energy cells
//! fill fractionally at 33 energy per cell.

use crate::bar::BarWaves;
use crate::cell::{CellRow, CellStyle, CellTarget};
use crate::spirit::SpiritRing;
use log::info;
use wisp_core::{Color, NodeId, RenderSink, Result, Vec3};
use wisp_particles::EffectRng;
use wisp_runtime::{EffectSystem, HostContext, HostEvent, PlayerState};

const ENERGY_PER_CELL: u32 = 33;

const LIFE_ROW_ORIGIN: Vec3 = Vec3::new(-6.0, 4.5, 0.0);
const ENERGY_ROW_ORIGIN: Vec3 = Vec3::new(-6.0, 3.2, 0.0);
const SPIRIT_ORIGIN: Vec3 = Vec3::new(6.5, 4.5, 0.0);
const BAR_ORIGIN: Vec3 = Vec3::new(-6.0, 2.6, 0.0);

const BAR_FADE_DIST: f32 = 2.0;
const BAR_FADE_LENGTH: f32 = 1.5;
const BAR_ALPHA: f32 = 0.5;

const LIFEBLOOD_COLOR: Color = Color {
    r: 93.0 / 255.0,
    g: 183.0 / 255.0,
    b: 209.0 / 255.0,
    a: 1.0,
};

/// Bar waves shift toward this while the player is overcharmed
const OVERCHARM_COLOR: Color = Color {
    r: 0.9,
    g: 0.0,
    b: 0.9,
    a: 0.8,
};

pub struct Hud {
    rng: EffectRng,
    life: CellRow,
    energy: CellRow,
    waves: BarWaves,
    spirit: SpiritRing,
    spirit_anchor: Option<NodeId>,
    bar_anchor: Option<NodeId>,
}

impl Hud {
    pub fn new(seed: u32) -> Result<Self> {
        let mut rng = EffectRng::new(seed);
        let waves = BarWaves::new(&mut rng)?;
        let spirit = SpiritRing::new(&mut rng)?;
        Ok(Self {
            rng,
            life: CellRow::new(CellStyle::life(), LIFE_ROW_ORIGIN, 0xA11CE),
            energy: CellRow::new(CellStyle::energy(), ENERGY_ROW_ORIGIN, 0xB0B),
            waves,
            spirit,
            spirit_anchor: None,
            bar_anchor: None,
        })
    }

    pub fn particle_count(&self) -> usize {
        self.life.mote_count()
            + self.energy.mote_count()
            + self.waves.wave_count()
            + self.spirit.mote_count()
    }

    fn life_targets(player: &PlayerState) -> Vec<CellTarget> {
        let style = CellStyle::life();
        let mut targets = Vec::new();
        for i in 0..player.max_health {
            targets.push(CellTarget {
                fill: if i < player.health { 1.0 } else { 0.0 },
                color: style.body_color,
                drip: None,
            });
        }
        for _ in 0..player.lifeblood {
            targets.push(CellTarget {
                fill: 1.0,
                color: LIFEBLOOD_COLOR,
                drip: Some(LIFEBLOOD_COLOR),
            });
        }
        targets
    }

    fn energy_targets(player: &PlayerState) -> Vec<CellTarget> {
        let style = CellStyle::energy();
        let cells = player.max_energy.div_ceil(ENERGY_PER_CELL);
        (0..cells)
            .map(|i| {
                let in_cell = player
                    .energy
                    .saturating_sub(i * ENERGY_PER_CELL)
                    .min(ENERGY_PER_CELL);
                let fraction = (in_cell as f32 / ENERGY_PER_CELL as f32).sqrt();
                CellTarget {
                    fill: fraction,
                    color: style.body_color,
                    drip: (in_cell == ENERGY_PER_CELL).then_some(style.drip_color),
                }
            })
            .collect()
    }
}

impl EffectSystem for Hud {
    fn initialize(&mut self, _ctx: &HostContext, sink: &mut dyn RenderSink) -> Result<()> {
        let spirit_anchor = sink.create_anchor("spirit_counter");
        sink.place_anchor(spirit_anchor, SPIRIT_ORIGIN);
        self.spirit_anchor = Some(spirit_anchor);

        let bar_anchor = sink.create_anchor("hud_bar");
        sink.place_anchor(bar_anchor, BAR_ORIGIN);
        self.bar_anchor = Some(bar_anchor);

        info!("hud: anchors placed");
        Ok(())
    }

    fn handle_event(&mut self, _event: &HostEvent, _ctx: &HostContext) {}

    fn update(&mut self, ctx: &HostContext, dt: f32, sink: &mut dyn RenderSink) -> Result<()> {
        if !(ctx.skin_active && ctx.settings.enable_hud) {
            // Let whatever is airborne land, but spawn nothing new
            self.life.settle(dt, sink);
            self.energy.settle(dt, sink);
            self.waves.settle(dt, sink);
            self.spirit.settle(dt, sink);
            return Ok(());
        }

        self.life
            .update(&Self::life_targets(&ctx.player), dt, sink)?;
        self.energy
            .update(&Self::energy_targets(&ctx.player), dt, sink)?;

        if let Some(anchor) = self.bar_anchor {
            let mut color = CellStyle::life().body_color.with_alpha(BAR_ALPHA);
            if ctx.player.overcharmed {
                color = color.lerp(OVERCHARM_COLOR, 0.5);
            }
            self.waves.update(
                dt,
                anchor,
                1.0,
                BAR_FADE_DIST,
                BAR_FADE_LENGTH,
                color,
                &mut self.rng,
                sink,
            );
        }
        if let Some(anchor) = self.spirit_anchor {
            self.spirit.update(dt, anchor, 1.0, &mut self.rng, sink);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "hud"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_core::MemorySink;
    use wisp_runtime::Settings;

    fn hud_ctx() -> HostContext {
        let mut ctx = HostContext::new(Settings::default());
        ctx.skin_active = true;
        ctx.player.health = 3;
        ctx.player.max_health = 5;
        ctx.player.energy = 66;
        ctx.player.max_energy = 99;
        ctx
    }

    #[test]
    fn energy_targets_split_across_cells() {
        let ctx = hud_ctx();
        let targets = Hud::energy_targets(&ctx.player);
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].fill, 1.0);
        assert_eq!(targets[1].fill, 1.0);
        assert_eq!(targets[2].fill, 0.0);
        assert!(targets[0].drip.is_some());
        assert!(targets[2].drip.is_none());
    }

    #[test]
    fn life_targets_append_lifeblood() {
        let mut ctx = hud_ctx();
        ctx.player.lifeblood = 2;
        let targets = Hud::life_targets(&ctx.player);
        assert_eq!(targets.len(), 7);
        assert!(targets[6].drip.is_some());
        assert_eq!(targets[6].color, LIFEBLOOD_COLOR);
    }

    #[test]
    fn disabled_hud_spawns_nothing() {
        let mut ctx = hud_ctx();
        ctx.settings.enable_hud = false;
        let mut sink = MemorySink::new();
        let mut hud = Hud::new(1).unwrap();
        hud.initialize(&ctx, &mut sink).unwrap();

        for _ in 0..60 {
            hud.update(&ctx, 1.0 / 60.0, &mut sink).unwrap();
        }
        assert_eq!(hud.particle_count(), 0);
    }

    #[test]
    fn active_hud_populates() {
        let ctx = hud_ctx();
        let mut sink = MemorySink::new();
        let mut hud = Hud::new(2).unwrap();
        hud.initialize(&ctx, &mut sink).unwrap();

        for _ in 0..600 {
            hud.update(&ctx, 1.0 / 60.0, &mut sink).unwrap();
        }
        // Spirit ring alone sustains a large population; drips add more
        assert!(hud.particle_count() > 60, "got {}", hud.particle_count());
    }
}
