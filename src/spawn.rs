//! Spawn context and the spatial distribution generator.
//!
//! [`SpawnContext`] wraps the random source behind a few helpers so every
//! generation site draws from the same stream. [`generate_particles`] produces
//! the morphing field: for each particle a scattered position on a jittered
//! Fibonacci sphere and a tree position inside a center-biased cone, plus
//! rotations, scale, kind, and color.

use crate::config::TreeConfig;
use crate::particle::{Particle, ParticleKind};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Random source for particle generation.
///
/// `new()` seeds from entropy so every run of the piece looks a little
/// different; `seeded()` gives reproducible fields for tests.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from system entropy.
    pub fn new() -> Self {
        Self { rng: SmallRng::from_entropy() }
    }

    /// Create a context with an explicit seed. Identical seeds produce
    /// identical particle fields.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Random f32 in [0, 1).
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random angle in [0, 2π).
    #[inline]
    pub fn random_phase(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Random unit vector.
    pub fn random_direction(&mut self) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = self.rng.gen_range(0.0..PI);
        Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        )
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the morphing particle field.
///
/// Produces `config.total_particles()` particles. Returns an empty vector for
/// a zero count. `config.ornament_ratio` is assumed to be within [0, 1]
/// (enforced by [`TreeConfig::validate`] at the configuration boundary).
pub fn generate_particles(config: &TreeConfig, ctx: &mut SpawnContext) -> Vec<Particle> {
    let count = config.total_particles();
    let mut particles = Vec::with_capacity(count);

    for i in 0..count {
        // Fibonacci-like angular spacing keeps the scattered cloud uniform;
        // plain uniform sphere sampling visibly clusters at the poles.
        let phi = (-1.0 + 2.0 * i as f32 / count as f32).acos();
        let theta = (count as f32 * PI).sqrt() * phi;
        let r_scatter = ctx.random_range(0.5, 1.0) * config.scatter_radius;
        let scatter_position = Vec3::new(
            r_scatter * phi.sin() * theta.cos(),
            r_scatter * phi.sin() * theta.sin(),
            r_scatter * phi.cos(),
        );

        let y = ctx.random() * config.tree_height;
        // Max radius shrinks linearly to zero at the tip.
        let max_radius = (1.0 - y / config.tree_height) * config.tree_radius;
        let angle = ctx.random_phase();
        // The power bias pulls mass toward the axis: a dense core with a
        // sparser fringe, matching natural tree silhouettes.
        let radial = max_radius * ctx.random().powf(0.7);
        let tree_position = Vec3::new(
            radial * angle.cos(),
            y - config.tree_height / 2.0,
            radial * angle.sin(),
        );

        let color = assign_color(config, ctx, radial, max_radius, y);

        let scatter_rotation = Vec3::new(
            ctx.random() * PI,
            ctx.random() * PI,
            ctx.random() * PI,
        );
        // Radial alignment so needles point outward once the tree forms.
        let tree_rotation = Vec3::new(
            tree_position.z.atan2(tree_position.y) + FRAC_PI_2,
            0.0,
            tree_position.x.atan2(tree_position.z),
        );

        let kind = if ctx.random() < config.ornament_ratio {
            ParticleKind::Ornament
        } else {
            ParticleKind::Needle
        };
        let scale = match kind {
            ParticleKind::Ornament => ctx.random_range(0.2, 0.6),
            ParticleKind::Needle => ctx.random_range(0.1, 0.4),
        };

        particles.push(Particle {
            scatter_position,
            tree_position,
            scatter_rotation,
            tree_rotation,
            scale,
            kind,
            color,
        });
    }

    let ornaments = particles
        .iter()
        .filter(|p| p.kind == ParticleKind::Ornament)
        .count();
    log::debug!(
        "generated {} particles ({} needles, {} ornaments)",
        particles.len(),
        particles.len() - ornaments,
        ornaments
    );

    particles
}

/// Assign a color from the palette, weighted by radial position and height.
///
/// Particles beyond 75% of the local max radius are "outer": they receive an
/// accent color with probability scaled by height, so accents concentrate
/// near the top of the silhouette. Inner particles alternate the base hues.
fn assign_color(
    config: &TreeConfig,
    ctx: &mut SpawnContext,
    radial: f32,
    max_radius: f32,
    y: f32,
) -> Vec3 {
    let palette = &config.palette;
    let is_outer = radial > max_radius * 0.75;

    if is_outer {
        let height_weight =
            (y / config.tree_height + (ctx.random() - 0.5) * 0.15).clamp(0.0, 1.0);
        let p_soft = 0.25 * height_weight;
        let p_gold = 0.15 * height_weight;
        let roll = ctx.random();
        if roll < p_soft {
            palette.accent_soft
        } else if roll < p_soft + p_gold {
            palette.accent_gold
        } else {
            base_hue(palette, ctx)
        }
    } else {
        base_hue(palette, ctx)
    }
}

fn base_hue(palette: &crate::palette::TreePalette, ctx: &mut SpawnContext) -> Vec3 {
    if ctx.random() > 0.5 {
        palette.base_a
    } else {
        palette.base_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_yields_empty_field() {
        let config = TreeConfig::default()
            .with_needle_count(0)
            .with_ornament_count(0);
        let mut ctx = SpawnContext::seeded(1);
        assert!(generate_particles(&config, &mut ctx).is_empty());
    }

    #[test]
    fn tree_positions_stay_inside_the_cone() {
        let config = TreeConfig::default();
        let mut ctx = SpawnContext::seeded(2);
        let half = config.tree_height / 2.0;

        for p in generate_particles(&config, &mut ctx) {
            assert!(p.tree_position.y >= -half && p.tree_position.y <= half);
            let radial =
                (p.tree_position.x * p.tree_position.x + p.tree_position.z * p.tree_position.z)
                    .sqrt();
            let taper = 1.0 - (p.tree_position.y + half) / config.tree_height;
            let max_radius = taper * config.tree_radius;
            assert!(radial <= max_radius + 1e-4);
        }
    }

    #[test]
    fn scatter_positions_stay_inside_the_shell() {
        let config = TreeConfig::default();
        let mut ctx = SpawnContext::seeded(3);

        for p in generate_particles(&config, &mut ctx) {
            let r = p.scatter_position.length();
            assert!(r <= config.scatter_radius + 1e-3);
            assert!(r >= 0.5 * config.scatter_radius - 1e-3);
        }
    }

    #[test]
    fn ornament_fraction_tracks_the_ratio() {
        let config = TreeConfig::default()
            .with_needle_count(95_000)
            .with_ornament_count(5_000)
            .with_ornament_ratio(0.05);
        let mut ctx = SpawnContext::seeded(4);
        let particles = generate_particles(&config, &mut ctx);

        let ornaments = particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Ornament)
            .count();
        let fraction = ornaments as f32 / particles.len() as f32;
        assert!((fraction - 0.05).abs() < 0.01);
    }

    #[test]
    fn identical_seeds_reproduce_the_field() {
        let config = TreeConfig::default().with_needle_count(500);
        let a = generate_particles(&config, &mut SpawnContext::seeded(7));
        let b = generate_particles(&config, &mut SpawnContext::seeded(7));
        assert_eq!(a, b);
    }

    #[test]
    fn ornament_scales_use_the_wider_range() {
        let config = TreeConfig::default();
        let mut ctx = SpawnContext::seeded(5);
        for p in generate_particles(&config, &mut ctx) {
            match p.kind {
                ParticleKind::Ornament => assert!(p.scale >= 0.2 && p.scale < 0.6),
                ParticleKind::Needle => assert!(p.scale >= 0.1 && p.scale < 0.4),
            }
        }
    }

    #[test]
    fn random_direction_is_unit_length() {
        let mut ctx = SpawnContext::seeded(6);
        for _ in 0..100 {
            assert!((ctx.random_direction().length() - 1.0).abs() < 1e-4);
        }
    }
}
