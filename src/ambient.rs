//! Ambient backdrop: snow, stars, base rings, and the apex star.
//!
//! Everything here runs on simple periodic motion uncoupled from the morph
//! factor - the backdrop stays calm while the tree releases and reforms.
//! None of these groups override [`Animated::set_unleashed`].

use crate::buffers::PointBuffers;
use crate::config::TreeConfig;
use crate::palette;
use crate::spawn::SpawnContext;
use crate::stage::{Animated, Tick};
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Half-extent of the snow field box.
const SNOW_FIELD_HALF: f32 = 25.0;
/// Downward snow speed, units per second.
const SNOW_FALL_SPEED: f32 = 1.5;
/// Inner radius of the star shell.
const STAR_SHELL_RADIUS: f32 = 100.0;
/// Radial depth of the star shell.
const STAR_SHELL_DEPTH: f32 = 50.0;
/// Starfield rotation, radians per second.
const STAR_ROTATION_SPEED: f32 = 0.02;
/// Apex star spin, radians per second.
const APEX_SPIN_SPEED: f32 = 1.5;

/// Falling snow. Points fall at a fixed speed and wrap back to the top of
/// the field.
#[derive(Debug)]
pub struct Snow {
    positions: Vec<Vec3>,
    buffers: PointBuffers,
}

impl Snow {
    /// Scatter `config.snow_count` flakes through the field box.
    pub fn new(config: &TreeConfig, ctx: &mut SpawnContext) -> Self {
        let positions: Vec<Vec3> = (0..config.snow_count)
            .map(|_| {
                Vec3::new(
                    ctx.random_range(-SNOW_FIELD_HALF, SNOW_FIELD_HALF),
                    ctx.random_range(-SNOW_FIELD_HALF, SNOW_FIELD_HALF),
                    ctx.random_range(-SNOW_FIELD_HALF, SNOW_FIELD_HALF),
                )
            })
            .collect();

        let mut buffers = PointBuffers::new(config.snow_count);
        for i in 0..config.snow_count {
            buffers.write_color(i, palette::WHITE);
            buffers.write_size(i, 0.06);
            buffers.write_opacity(i, 0.4);
        }

        Self { positions, buffers }
    }

    /// The group's point buffers.
    pub fn buffers(&self) -> &PointBuffers {
        &self.buffers
    }

    /// The group's point buffers, mutably.
    pub fn buffers_mut(&mut self) -> &mut PointBuffers {
        &mut self.buffers
    }
}

impl Animated for Snow {
    fn advance(&mut self, tick: Tick) {
        for position in &mut self.positions {
            position.y -= tick.delta * SNOW_FALL_SPEED;
            if position.y < -SNOW_FIELD_HALF {
                position.y = SNOW_FIELD_HALF;
            }
        }
        if !self.buffers.is_attached() {
            log::trace!("snow buffers not attached, skipping write");
            return;
        }
        for (i, &position) in self.positions.iter().enumerate() {
            self.buffers.write_position(i, position);
        }
        self.buffers.mark_dirty();
    }
}

/// Distant star shell rotating slowly around the vertical axis.
#[derive(Debug)]
pub struct Starfield {
    base: Vec<Vec3>,
    angle: f32,
    buffers: PointBuffers,
}

impl Starfield {
    /// Scatter `config.star_count` stars through the shell.
    pub fn new(config: &TreeConfig, ctx: &mut SpawnContext) -> Self {
        let base: Vec<Vec3> = (0..config.star_count)
            .map(|_| {
                let radius = STAR_SHELL_RADIUS + ctx.random() * STAR_SHELL_DEPTH;
                ctx.random_direction() * radius
            })
            .collect();

        let mut buffers = PointBuffers::new(config.star_count);
        for i in 0..config.star_count {
            buffers.write_color(i, palette::WHITE);
            buffers.write_size(i, 0.05 + ctx.random() * 0.2);
            buffers.write_opacity(i, ctx.random_range(0.3, 1.0));
        }

        Self { base, angle: 0.0, buffers }
    }

    /// Current rotation angle in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// The group's point buffers.
    pub fn buffers(&self) -> &PointBuffers {
        &self.buffers
    }

    /// The group's point buffers, mutably.
    pub fn buffers_mut(&mut self) -> &mut PointBuffers {
        &mut self.buffers
    }
}

impl Animated for Starfield {
    fn advance(&mut self, tick: Tick) {
        self.angle += tick.delta * STAR_ROTATION_SPEED;
        if !self.buffers.is_attached() {
            log::trace!("starfield buffers not attached, skipping write");
            return;
        }
        let (sin, cos) = self.angle.sin_cos();
        for (i, &star) in self.base.iter().enumerate() {
            let rotated = Vec3::new(
                star.x * cos - star.z * sin,
                star.y,
                star.x * sin + star.z * cos,
            );
            self.buffers.write_position(i, rotated);
        }
        self.buffers.mark_dirty();
    }
}

/// Concentric point rings at the base of the tree, each rotating at its own
/// speed.
#[derive(Debug)]
pub struct BaseRings {
    angles: Vec<f32>,
    particles_per_ring: usize,
    tree_height: f32,
    tree_radius: f32,
    buffers: PointBuffers,
}

impl BaseRings {
    /// Lay out `config.ring_count` rings.
    pub fn new(config: &TreeConfig) -> Self {
        let count = config.ring_count * config.particles_per_ring;
        let mut buffers = PointBuffers::new(count);
        for i in 0..count {
            buffers.write_color(i, palette::LIGHT_GOLD);
            buffers.write_size(i, 0.05);
            buffers.write_opacity(i, 0.6);
        }

        Self {
            angles: vec![0.0; config.ring_count],
            particles_per_ring: config.particles_per_ring,
            tree_height: config.tree_height,
            tree_radius: config.tree_radius,
            buffers,
        }
    }

    /// Current rotation angle of ring `index`, in radians.
    pub fn angle(&self, index: usize) -> f32 {
        self.angles[index]
    }

    /// The group's point buffers.
    pub fn buffers(&self) -> &PointBuffers {
        &self.buffers
    }

    /// The group's point buffers, mutably.
    pub fn buffers_mut(&mut self) -> &mut PointBuffers {
        &mut self.buffers
    }
}

impl Animated for BaseRings {
    fn advance(&mut self, tick: Tick) {
        // Outer rings spin faster than inner ones.
        for (ring, angle) in self.angles.iter_mut().enumerate() {
            *angle += tick.delta * 0.3 * (ring + 1) as f32;
        }
        if !self.buffers.is_attached() {
            log::trace!("ring buffers not attached, skipping write");
            return;
        }
        let y = 0.5 - self.tree_height / 2.0;
        for (ring, &angle) in self.angles.iter().enumerate() {
            let radius = self.tree_radius + 1.0 + ring as f32 * 1.5;
            for i in 0..self.particles_per_ring {
                let a = i as f32 / self.particles_per_ring as f32 * TAU + angle;
                let position = Vec3::new(a.cos() * radius, y, a.sin() * radius);
                self.buffers.write_position(ring * self.particles_per_ring + i, position);
            }
        }
        self.buffers.mark_dirty();
    }
}

/// Transform of the apex star, consumed directly by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApexTransform {
    /// World position above the tree tip.
    pub position: Vec3,
    /// Rotation around the vertical axis, radians.
    pub rotation_y: f32,
    /// Uniform pulse scale.
    pub scale: f32,
}

/// The star above the tree: steady spin, sinusoidal scale pulse.
#[derive(Debug)]
pub struct StarApex {
    transform: ApexTransform,
}

impl StarApex {
    /// Place the star above the tree tip.
    pub fn new(config: &TreeConfig) -> Self {
        Self {
            transform: ApexTransform {
                position: Vec3::new(0.0, config.tree_height / 2.0 + 2.0, 0.0),
                rotation_y: 0.0,
                scale: 1.0,
            },
        }
    }

    /// The current transform.
    #[inline]
    pub fn transform(&self) -> ApexTransform {
        self.transform
    }

    /// The star's 2D outline for the renderer to extrude: five points,
    /// outer radius 0.85, inner radius 0.22.
    pub fn outline() -> Vec<Vec2> {
        star_outline(5, 0.85, 0.22)
    }
}

impl Animated for StarApex {
    fn advance(&mut self, tick: Tick) {
        self.transform.rotation_y += tick.delta * APEX_SPIN_SPEED;
        self.transform.scale = 1.0 + (tick.elapsed * 3.5).sin() * 0.12;
    }
}

/// Outline of an n-pointed star in the XY plane, first vertex on the
/// vertical axis.
pub fn star_outline(points: usize, outer_radius: f32, inner_radius: f32) -> Vec<Vec2> {
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = i as f32 / (points * 2) as f32 * TAU - FRAC_PI_2;
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snow_wraps_at_the_floor() {
        let config = TreeConfig::default().with_snow_count(100);
        let mut snow = Snow::new(&config, &mut SpawnContext::seeded(1));
        snow.buffers_mut().attach();
        // Fall for long enough that every flake wraps at least once.
        for frame in 0..(40 * 60) {
            snow.advance(Tick { elapsed: frame as f32 / 60.0, delta: 1.0 / 60.0 });
        }
        for &y in snow.positions.iter().map(|p| &p.y) {
            assert!(y >= -SNOW_FIELD_HALF && y <= SNOW_FIELD_HALF);
        }
    }

    #[test]
    fn starfield_rotation_preserves_radius() {
        let config = TreeConfig::default().with_star_count(50);
        let mut stars = Starfield::new(&config, &mut SpawnContext::seeded(2));
        stars.buffers_mut().attach();
        for frame in 0..120 {
            stars.advance(Tick { elapsed: frame as f32 / 60.0, delta: 1.0 / 60.0 });
        }
        let positions = stars.buffers().positions();
        for (i, star) in stars.base.iter().enumerate() {
            let rotated = Vec3::new(
                positions[i * 3],
                positions[i * 3 + 1],
                positions[i * 3 + 2],
            );
            assert!((rotated.length() - star.length()).abs() < 1e-3);
            assert_eq!(rotated.y, star.y);
        }
    }

    #[test]
    fn outer_rings_spin_faster() {
        let config = TreeConfig::default();
        let mut rings = BaseRings::new(&config);
        rings.buffers_mut().attach();
        rings.advance(Tick { elapsed: 1.0, delta: 1.0 });
        assert!(rings.angle(2) > rings.angle(1));
        assert!(rings.angle(1) > rings.angle(0));
    }

    #[test]
    fn apex_pulses_around_unit_scale() {
        let config = TreeConfig::default();
        let mut apex = StarApex::new(&config);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for frame in 0..600 {
            apex.advance(Tick { elapsed: frame as f32 / 60.0, delta: 1.0 / 60.0 });
            min = min.min(apex.transform().scale);
            max = max.max(apex.transform().scale);
        }
        assert!(min >= 0.88 - 1e-3);
        assert!(max <= 1.12 + 1e-3);
        assert!(max - min > 0.2);
    }

    #[test]
    fn star_outline_alternates_radii() {
        let outline = star_outline(5, 0.85, 0.22);
        assert_eq!(outline.len(), 10);
        for (i, v) in outline.iter().enumerate() {
            let expected = if i % 2 == 0 { 0.85 } else { 0.22 };
            assert!((v.length() - expected).abs() < 1e-5);
        }
        // First vertex points straight up.
        assert!(outline[0].x.abs() < 1e-5);
        assert!((outline[0].y + 0.85).abs() < 1e-5 || (outline[0].y - 0.85).abs() < 1e-5);
    }
}
