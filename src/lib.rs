//! # tinsel - morphing particle tree engine
//!
//! A procedurally generated tree of particles that breathes between a
//! structured cone and a scattered cloud, with golden trail streamers, a glow
//! cloud, rotating base rings, a pulsing apex star, snow, and a distant
//! starfield layered around it. One boolean toggle flips the piece between
//! its "contained" and "released" states; every transition is a smooth,
//! frame-rate-independent exponential ease.
//!
//! The crate is the animation core only: it generates the particle fields
//! once, then rewrites flat render-ready buffers every frame. Rendering
//! (shaders, camera, bloom) and UI are external collaborators - the renderer
//! polls buffers and redraw flags, the UI calls a single setter.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinsel::prelude::*;
//!
//! let mut stage = Stage::new(TreeConfig::default())?;
//! stage.attach_all();
//!
//! let mut time = Time::new();
//! loop {
//!     let (elapsed, delta) = time.update();
//!     stage.update(elapsed, delta);
//!
//!     // Renderer side: upload whatever changed, then clear the flags.
//!     let glow = stage.glow_mut().buffers_mut();
//!     if glow.needs_update() {
//!         upload(glow.position_bytes(), glow.color_bytes());
//!         glow.mark_clean();
//!     }
//! }
//! ```
//!
//! Toggling the visual state is safe at any time, including mid-transition:
//!
//! ```ignore
//! stage.set_unleashed(true);   // release the tree into the cloud
//! stage.set_unleashed(false);  // gather it back
//! ```
//!
//! ## Core Concepts
//!
//! - **Particles** are generated once ([`generate_particles`]): each carries
//!   a scattered position, a tree position, rotations for both, a scale, a
//!   kind, and a palette color. They never change afterwards - all motion is
//!   a deterministic function of the morph factor and elapsed time.
//! - **Morph controllers** ([`MorphController`]) converge a scalar factor
//!   exponentially toward the toggled target. Different groups use different
//!   rates, so the transition reads in layers rather than one snap.
//! - **Buffers** ([`PointBuffers`], [`InstanceBuffers`]) are allocated once
//!   and overwritten in place - the tick loop never allocates. Groups whose
//!   buffers are not attached are skipped, never a crash.
//!
//! Reproducibility: [`Stage::with_seed`] and [`SpawnContext::seeded`] pin the
//! generation stream for tests; the default is seeded from entropy so every
//! run of the piece looks a little different.

pub mod ambient;
pub mod buffers;
pub mod config;
pub mod error;
pub mod glow;
pub mod morph;
pub mod palette;
pub mod particle;
pub mod spawn;
pub mod stage;
pub mod streamers;
pub mod time;
pub mod tree;

pub use ambient::{star_outline, ApexTransform, BaseRings, Snow, StarApex, Starfield};
pub use buffers::{InstanceBuffers, PointBuffers};
pub use config::TreeConfig;
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use glow::GlowPoints;
pub use morph::{lerp, mix, smoothstep, smoothstep_between, MorphController, MorphTarget, TrailReveal};
pub use palette::TreePalette;
pub use particle::{Particle, ParticleKind};
pub use spawn::{generate_particles, SpawnContext};
pub use stage::{Animated, Stage, Tick};
pub use streamers::{SpeedClass, Streamers};
pub use time::Time;
pub use tree::TreeParticles;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use tinsel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ambient::{ApexTransform, BaseRings, Snow, StarApex, Starfield};
    pub use crate::buffers::{InstanceBuffers, PointBuffers};
    pub use crate::config::TreeConfig;
    pub use crate::error::ConfigError;
    pub use crate::glow::GlowPoints;
    pub use crate::morph::{MorphController, MorphTarget, TrailReveal};
    pub use crate::particle::{Particle, ParticleKind};
    pub use crate::spawn::{generate_particles, SpawnContext};
    pub use crate::stage::{Animated, Stage, Tick};
    pub use crate::streamers::{SpeedClass, Streamers};
    pub use crate::time::Time;
    pub use crate::tree::TreeParticles;
    pub use crate::{Vec2, Vec3};
}
