//! Stage configuration.
//!
//! Every count, dimension, and rate of the piece lives here. The defaults are
//! the hand-tuned values the piece ships with; use the `with_*` methods to
//! adjust them before handing the config to [`Stage::new`](crate::Stage::new).
//!
//! # Example
//!
//! ```ignore
//! let config = TreeConfig::default()
//!     .with_needle_count(9_000)
//!     .with_tree_height(14.0)
//!     .with_morph_rate(5.0);
//! let stage = Stage::new(config)?;
//! ```

use crate::error::ConfigError;
use crate::palette::TreePalette;

/// Configuration for a [`Stage`](crate::Stage) and its particle groups.
///
/// Validation happens once, in [`TreeConfig::validate`], called by stage
/// construction. Per-tick code assumes a valid config and never re-checks.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Number of needle instances in the morphing field.
    pub needle_count: usize,
    /// Number of ornament instances in the morphing field.
    pub ornament_count: usize,
    /// Probability that a generated particle is an ornament.
    ///
    /// Must be within [0, 1]. Defaults to the ornament share of the total
    /// instance count.
    pub ornament_ratio: f32,
    /// Number of points in the additive glow cloud.
    pub glow_count: usize,
    /// Number of falling snow points.
    pub snow_count: usize,
    /// Number of backdrop stars.
    pub star_count: usize,
    /// Number of rotating base rings.
    pub ring_count: usize,
    /// Points per base ring.
    pub particles_per_ring: usize,
    /// Number of trail streamer curves.
    pub streamer_count: usize,
    /// Points per streamer curve. At least 2.
    pub points_per_streamer: usize,
    /// Height of the tree cone.
    pub tree_height: f32,
    /// Radius of the tree cone at its base.
    pub tree_radius: f32,
    /// Outer radius of the scattered cloud.
    pub scatter_radius: f32,
    /// Convergence rate of the geometric morph, per second.
    pub morph_rate: f32,
    /// Convergence rate of the glow-cloud expansion, per second.
    pub glow_rate: f32,
    /// Speed of the one-shot trail reveal after a release.
    pub trail_reveal_rate: f32,
    /// Colors assigned to generated particles.
    pub palette: TreePalette,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            needle_count: 4_500,
            ornament_count: 200,
            ornament_ratio: 200.0 / 4_700.0,
            glow_count: 18_000,
            snow_count: 1_200,
            star_count: 3_000,
            ring_count: 3,
            particles_per_ring: 400,
            streamer_count: 10,
            points_per_streamer: 80,
            tree_height: 11.0,
            tree_radius: 5.0,
            scatter_radius: 15.0,
            morph_rate: 3.5,
            glow_rate: 2.4,
            trail_reveal_rate: 0.8,
            palette: TreePalette::default(),
        }
    }
}

impl TreeConfig {
    /// Create a config with the default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the needle instance count.
    pub fn with_needle_count(mut self, count: usize) -> Self {
        self.needle_count = count;
        self
    }

    /// Set the ornament instance count.
    pub fn with_ornament_count(mut self, count: usize) -> Self {
        self.ornament_count = count;
        self
    }

    /// Set the ornament probability. Must be within [0, 1].
    pub fn with_ornament_ratio(mut self, ratio: f32) -> Self {
        self.ornament_ratio = ratio;
        self
    }

    /// Set the glow cloud point count.
    pub fn with_glow_count(mut self, count: usize) -> Self {
        self.glow_count = count;
        self
    }

    /// Set the snow point count.
    pub fn with_snow_count(mut self, count: usize) -> Self {
        self.snow_count = count;
        self
    }

    /// Set the backdrop star count.
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self
    }

    /// Set the number of streamer curves.
    pub fn with_streamer_count(mut self, count: usize) -> Self {
        self.streamer_count = count;
        self
    }

    /// Set the points per streamer curve.
    pub fn with_points_per_streamer(mut self, points: usize) -> Self {
        self.points_per_streamer = points;
        self
    }

    /// Set the tree cone height.
    pub fn with_tree_height(mut self, height: f32) -> Self {
        self.tree_height = height;
        self
    }

    /// Set the tree cone base radius.
    pub fn with_tree_radius(mut self, radius: f32) -> Self {
        self.tree_radius = radius;
        self
    }

    /// Set the scattered-cloud radius.
    pub fn with_scatter_radius(mut self, radius: f32) -> Self {
        self.scatter_radius = radius;
        self
    }

    /// Set the geometric morph convergence rate, per second.
    pub fn with_morph_rate(mut self, rate: f32) -> Self {
        self.morph_rate = rate;
        self
    }

    /// Set the glow expansion convergence rate, per second.
    pub fn with_glow_rate(mut self, rate: f32) -> Self {
        self.glow_rate = rate;
        self
    }

    /// Set the trail reveal speed.
    pub fn with_trail_reveal_rate(mut self, rate: f32) -> Self {
        self.trail_reveal_rate = rate;
        self
    }

    /// Set the generation palette.
    pub fn with_palette(mut self, palette: TreePalette) -> Self {
        self.palette = palette;
        self
    }

    /// Total number of particles in the morphing field.
    #[inline]
    pub fn total_particles(&self) -> usize {
        self.needle_count + self.ornament_count
    }

    /// Validate the configuration.
    ///
    /// Rejects non-positive dimensions and rates, an ornament ratio outside
    /// [0, 1], and streamer curves too short to parameterize.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tree_height", self.tree_height),
            ("tree_radius", self.tree_radius),
            ("scatter_radius", self.scatter_radius),
            ("morph_rate", self.morph_rate),
            ("glow_rate", self.glow_rate),
            ("trail_reveal_rate", self.trail_reveal_rate),
        ];
        for (name, value) in positive {
            // `!(value > 0.0)` also rejects NaN.
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.ornament_ratio) {
            return Err(ConfigError::RatioOutOfRange(self.ornament_ratio));
        }
        if self.points_per_streamer < 2 {
            return Err(ConfigError::TrailTooShort(self.points_per_streamer));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TreeConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_height_rejected() {
        let err = TreeConfig::default().with_tree_height(0.0).validate();
        assert_eq!(
            err,
            Err(ConfigError::NonPositive { name: "tree_height", value: 0.0 })
        );
    }

    #[test]
    fn nan_radius_rejected() {
        let err = TreeConfig::default().with_tree_radius(f32::NAN).validate();
        assert!(matches!(err, Err(ConfigError::NonPositive { name: "tree_radius", .. })));
    }

    #[test]
    fn ratio_out_of_range_rejected() {
        let err = TreeConfig::default().with_ornament_ratio(1.5).validate();
        assert_eq!(err, Err(ConfigError::RatioOutOfRange(1.5)));
    }

    #[test]
    fn single_point_trail_rejected() {
        let err = TreeConfig::default().with_points_per_streamer(1).validate();
        assert_eq!(err, Err(ConfigError::TrailTooShort(1)));
    }

    #[test]
    fn zero_counts_are_valid() {
        let config = TreeConfig::default()
            .with_needle_count(0)
            .with_ornament_count(0)
            .with_glow_count(0);
        assert!(config.validate().is_ok());
        assert_eq!(config.total_particles(), 0);
    }
}
