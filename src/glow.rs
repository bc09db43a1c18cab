//! The additive glow cloud.
//!
//! A dense cone of point sprites inside the tree silhouette, colored by a
//! radial emerald-to-gold gradient. On release the whole cloud expands to
//! several times its size under its own morph controller (slower than the
//! geometric morph, so the transition reads in layers); sparkle and breathing
//! run continuously on per-point phase constants.

use crate::buffers::PointBuffers;
use crate::config::TreeConfig;
use crate::morph::{MorphController, MorphTarget};
use crate::palette;
use crate::spawn::SpawnContext;
use crate::stage::{Animated, Tick};
use glam::Vec3;

/// How far the cloud expands at full release.
const EXPANSION: f32 = 3.0;

/// One glow point. Immutable once generated.
#[derive(Debug, Clone, Copy)]
struct GlowPoint {
    base: Vec3,
    color: Vec3,
    size: f32,
    phase: f32,
}

/// The glow-point cloud group.
#[derive(Debug)]
pub struct GlowPoints {
    points: Vec<GlowPoint>,
    morph: MorphController,
    buffers: PointBuffers,
}

impl GlowPoints {
    /// Generate the cloud and size its buffers.
    pub fn new(config: &TreeConfig, ctx: &mut SpawnContext) -> Self {
        let height = config.tree_height;
        // The glow sits slightly inside the needle silhouette.
        let radius = config.tree_radius * 0.9;

        let mut points = Vec::with_capacity(config.glow_count);
        for _ in 0..config.glow_count {
            let y = ctx.random() * height - height / 2.0;
            let normalized_y = (y + height / 2.0) / height;
            let r_limit = (1.0 - normalized_y) * radius;
            let angle = ctx.random_phase();
            let r = ctx.random().powf(0.6) * r_limit;

            let base = Vec3::new(r * angle.cos(), y, r * angle.sin());

            let dist_ratio = r / (r_limit + 0.001);
            let color = if dist_ratio > 0.65 {
                let mut c = palette::EMERALD
                    .lerp(palette::BRIGHT_GOLD, (dist_ratio - 0.65) * 2.8);
                if ctx.random() > 0.9 {
                    c = c.lerp(palette::WHITE, 0.5);
                }
                c
            } else {
                palette::EMERALD.lerp(palette::LIGHT_EMERALD, dist_ratio * 1.5)
            };

            points.push(GlowPoint {
                base,
                color,
                size: ctx.random() * 0.4 + 0.08,
                phase: ctx.random_phase(),
            });
        }

        Self {
            points,
            morph: MorphController::new(MorphTarget::TreeShape, config.glow_rate),
            buffers: PointBuffers::new(config.glow_count),
        }
    }

    /// The group's morph controller.
    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    /// The cloud's point buffers.
    pub fn buffers(&self) -> &PointBuffers {
        &self.buffers
    }

    /// The cloud's point buffers, mutably.
    pub fn buffers_mut(&mut self) -> &mut PointBuffers {
        &mut self.buffers
    }
}

impl Animated for GlowPoints {
    fn advance(&mut self, tick: Tick) {
        let factor = self.morph.advance(tick.delta);
        if !self.buffers.is_attached() {
            log::trace!("glow buffers not attached, skipping write");
            return;
        }

        // Raw smoothed factor here: the ease is reserved for dual-position
        // blends, and the expansion has no second endpoint to land on.
        let release = 1.0 - factor;
        let expand = 1.0 + release * EXPANSION;
        let time = tick.elapsed;

        for (i, point) in self.points.iter().enumerate() {
            let mut position = point.base * expand;
            let breathing = (time * 1.2 + point.phase).sin() * 0.12;
            position += point.base.normalize_or_zero() * breathing;

            let sparkle = (0.5 + 0.5 * (time * (6.0 + point.phase * 2.0) + point.phase).sin())
                .powf(10.0);
            let opacity = 0.7 + 0.3 * (time * 2.0 + point.phase * 3.0).sin() + sparkle * 0.5;
            let size = point.size * (1.0 + release * 0.5 + sparkle * 0.3);
            let color = point.color.lerp(palette::WHITE, sparkle * 0.4);

            self.buffers.write_position(i, position);
            self.buffers.write_color(i, color);
            self.buffers.write_size(i, size);
            self.buffers.write_opacity(i, opacity);
        }
        self.buffers.mark_dirty();
    }

    fn set_unleashed(&mut self, released: bool) {
        self.morph.set_target(if released {
            MorphTarget::Scattered
        } else {
            MorphTarget::TreeShape
        });
    }
}
