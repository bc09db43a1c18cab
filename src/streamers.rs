//! Golden trail streamers.
//!
//! A small fixed set of comet-tail curves, each a fixed-length point sequence
//! recomputed every tick from closed-form time functions - nothing is
//! integrated or simulated. Each curve blends between a helical "tree spiral"
//! path and a wider, slower "scatter orbit" path by the eased transition
//! burst, with a directional kick that peaks mid-transition when releasing.
//! The trailing points fade to transparent, and the trail length itself is
//! animated by the one-shot reveal controller.

use crate::buffers::PointBuffers;
use crate::config::TreeConfig;
use crate::morph::{mix, smoothstep, smoothstep_between, TrailReveal};
use crate::palette;
use crate::spawn::SpawnContext;
use crate::stage::{Animated, Tick};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Rate of the transition burst window, per second.
const BURST_RATE: f32 = 1.2;
/// Peak magnitude of the release kick.
const KICK_STRENGTH: f32 = 1.5;
/// Time offset between neighboring points along one curve.
const POINT_LAG: f32 = 0.15;

/// Speed class a streamer is born into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    /// Quick darting ribbons.
    Fast,
    /// The main body of the swarm.
    Medium,
    /// Long lazy drifters.
    Slow,
}

impl SpeedClass {
    fn for_index(index: usize) -> Self {
        match index % 3 {
            0 => SpeedClass::Fast,
            1 => SpeedClass::Medium,
            _ => SpeedClass::Slow,
        }
    }

    fn speed_scale(self, ctx: &mut SpawnContext) -> f32 {
        match self {
            SpeedClass::Fast => 1.8 + ctx.random() * 0.4,
            SpeedClass::Medium => 1.1 + ctx.random() * 0.3,
            SpeedClass::Slow => 0.6 + ctx.random() * 0.2,
        }
    }
}

/// Per-streamer constants, fixed at creation.
#[derive(Debug, Clone, Copy)]
struct Streamer {
    class: SpeedClass,
    phase_offset: f32,
    radius_offset: f32,
    speed_scale: f32,
    burst_direction: Vec3,
    path_noise: f32,
}

/// The streamer group.
#[derive(Debug)]
pub struct Streamers {
    streamers: Vec<Streamer>,
    reveal: TrailReveal,
    released: bool,
    points_per_streamer: usize,
    tree_height: f32,
    tree_radius: f32,
    scatter_radius: f32,
    buffers: PointBuffers,
}

impl Streamers {
    /// Create the streamer set with randomized per-curve constants.
    pub fn new(config: &TreeConfig, ctx: &mut SpawnContext) -> Self {
        let count = config.streamer_count;
        let mut streamers = Vec::with_capacity(count);
        for i in 0..count {
            let class = SpeedClass::for_index(i);
            streamers.push(Streamer {
                class,
                phase_offset: i as f32 / count as f32 * TAU,
                radius_offset: 0.7 + ctx.random() * 0.6,
                speed_scale: class.speed_scale(ctx),
                burst_direction: ctx.random_direction(),
                path_noise: ctx.random_phase(),
            });
        }

        Self {
            streamers,
            reveal: TrailReveal::new(config.trail_reveal_rate),
            released: false,
            points_per_streamer: config.points_per_streamer,
            tree_height: config.tree_height,
            tree_radius: config.tree_radius,
            scatter_radius: config.scatter_radius,
            buffers: PointBuffers::new(count * config.points_per_streamer),
        }
    }

    /// Points per curve; the flat buffers concatenate the curves in order,
    /// so curve `i` occupies points `[i * n, (i + 1) * n)`.
    #[inline]
    pub fn points_per_streamer(&self) -> usize {
        self.points_per_streamer
    }

    /// Number of curves.
    #[inline]
    pub fn streamer_count(&self) -> usize {
        self.streamers.len()
    }

    /// Speed class of curve `index`.
    pub fn speed_class(&self, index: usize) -> SpeedClass {
        self.streamers[index].class
    }

    /// The trail reveal controller.
    pub fn reveal(&self) -> &TrailReveal {
        &self.reveal
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

impl Animated for Streamers {
    fn advance(&mut self, tick: Tick) {
        self.reveal.advance(tick.delta);
        if !self.buffers.is_attached() {
            log::trace!("streamer buffers not attached, skipping write");
            return;
        }

        let trail = self.reveal.length(self.released);
        let burst = smoothstep((self.reveal.elapsed() * BURST_RATE).clamp(0.0, 1.0));
        let group_opacity = if self.released { 0.8 } else { 0.6 };
        let n = self.points_per_streamer;
        let inv_last = 1.0 / (n - 1) as f32;

        for (s_idx, s) in self.streamers.iter().enumerate() {
            for j in 0..n {
                let t = j as f32 * inv_last;
                // Later points lead; earlier points trail behind in time.
                let local = tick.elapsed * s.speed_scale - (1.0 - t) * POINT_LAG;

                // Helical ribbon climbing and descending the cone.
                let climb_freq = 0.7 + s_idx as f32 * 0.04;
                let climb = (local * climb_freq + s.phase_offset).sin() * 0.5 + 0.5;
                let spiral_radius = (1.0 - climb) * self.tree_radius * s.radius_offset;
                let spiral_angle = local * 2.0 + s.phase_offset;
                let tree_point = Vec3::new(
                    spiral_angle.cos() * spiral_radius,
                    climb * self.tree_height - self.tree_height / 2.0,
                    spiral_angle.sin() * spiral_radius,
                );

                // Wider, slower elliptical orbit out in the cloud.
                let orbit_speed = s.speed_scale * 0.8;
                let orbit_radius =
                    self.scatter_radius + (local * 0.4 + s.path_noise).sin() * 6.0;
                let orbit_angle = local * orbit_speed + s.phase_offset;
                let orbit_y = (local * 0.5 + s.phase_offset).sin() * 8.0
                    + (local * 0.3 + s.path_noise).cos() * 4.0;
                let orbit_point = Vec3::new(
                    orbit_angle.cos() * orbit_radius,
                    orbit_y,
                    orbit_angle.sin() * orbit_radius,
                );

                let position = if self.released {
                    // Kick peaks mid-transition, zero at both endpoints.
                    let kick = (burst * PI).sin() * KICK_STRENGTH;
                    mix(tree_point, orbit_point, burst) + s.burst_direction * kick
                } else {
                    mix(tree_point, orbit_point, 1.0 - burst)
                };

                let visibility =
                    smoothstep_between(1.0 - trail - 0.1, 1.0 - trail + 0.1, t);
                let opacity = visibility * t * t * group_opacity;
                let head = smoothstep_between(0.95, 1.0, t);
                let color = palette::BRIGHT_GOLD.lerp(palette::WHITE, head * 0.8);

                let index = s_idx * n + j;
                self.buffers.write_position(index, position);
                self.buffers.write_color(index, color);
                self.buffers.write_opacity(index, opacity);
            }
        }
        self.buffers.mark_dirty();
    }

    fn set_unleashed(&mut self, released: bool) {
        if released != self.released {
            self.released = released;
            self.reveal.reset();
        }
    }
}
