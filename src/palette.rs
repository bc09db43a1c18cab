//! Colors of the piece.
//!
//! All colors are linear RGB in `Vec3` form, ready to be written into color
//! buffers. The tree body reads emerald, accents read gold, and the morphing
//! needle/ornament field carries the pink family.

use glam::Vec3;

/// Deep emerald - the body of the tree.
pub const EMERALD: Vec3 = Vec3::new(0.008, 0.173, 0.133);
/// Bright emerald - outer glow gradient and the apex star.
pub const LIGHT_EMERALD: Vec3 = Vec3::new(0.063, 0.725, 0.506);
/// Bright gold - streamers and silhouette accents.
pub const BRIGHT_GOLD: Vec3 = Vec3::new(1.0, 0.8, 0.2);
/// Burnished gold - ornament base tone.
pub const METAL_GOLD: Vec3 = Vec3::new(0.706, 0.325, 0.035);
/// Pale gold - the base rings.
pub const LIGHT_GOLD: Vec3 = Vec3::new(0.996, 0.953, 0.78);
/// Pure gold - highlight tone.
pub const PURE_GOLD: Vec3 = Vec3::new(1.0, 0.843, 0.0);
/// White - snow, sparkle highlights, streamer heads.
pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Near-white pink - the softest needle accent.
pub const LIGHT_PINK: Vec3 = Vec3::new(1.0, 0.91, 0.941);
/// Warm sparkling gold - the rarer needle accent.
pub const GOLD_SPARKLE: Vec3 = Vec3::new(0.984, 0.788, 0.42);
/// Saturated warm pink - first base hue of the needle field.
pub const WARM_PINK: Vec3 = Vec3::new(1.0, 0.42, 0.565);
/// Muted soft pink - second base hue of the needle field.
pub const SOFT_PINK: Vec3 = Vec3::new(1.0, 0.624, 0.71);

/// Palette used by the spatial distribution generator when assigning
/// per-particle colors.
///
/// Inner particles alternate between the two base hues; outer particles
/// near the top of the silhouette favor the accents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePalette {
    /// First base hue, used throughout the core.
    pub base_a: Vec3,
    /// Second base hue, alternated with `base_a`.
    pub base_b: Vec3,
    /// Soft accent for outer particles.
    pub accent_soft: Vec3,
    /// Gold accent for outer particles.
    pub accent_gold: Vec3,
}

impl Default for TreePalette {
    fn default() -> Self {
        Self {
            base_a: WARM_PINK,
            base_b: SOFT_PINK,
            accent_soft: LIGHT_PINK,
            accent_gold: GOLD_SPARKLE,
        }
    }
}
