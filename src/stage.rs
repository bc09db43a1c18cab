//! The animated stage: every particle group behind one update seam.
//!
//! [`Stage`] owns the morphing field, the glow cloud, the streamers, and the
//! ambient backdrop, and fans each frame's `(elapsed, delta)` out to them
//! through the [`Animated`] trait. The UI collaborator drives it with
//! [`Stage::set_unleashed`]; the rendering collaborator polls the groups'
//! buffers and transforms.
//!
//! All state is scoped to the stage instance - multiple stages can coexist,
//! and everything is regenerated on construction. Nothing persists.

use crate::ambient::{ApexTransform, BaseRings, Snow, StarApex, Starfield};
use crate::config::TreeConfig;
use crate::error::ConfigError;
use crate::glow::GlowPoints;
use crate::spawn::SpawnContext;
use crate::streamers::Streamers;
use crate::tree::TreeParticles;

/// One frame's timing, handed to every group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Total elapsed time in seconds.
    pub elapsed: f32,
    /// Time since the last frame in seconds.
    pub delta: f32,
}

/// The per-frame update seam every particle group implements.
///
/// Groups are embarrassingly parallel in principle: each `advance` reads only
/// generation data and writes only its own buffers. The stage runs them
/// sequentially on the host's frame callback.
pub trait Animated {
    /// Advance one frame and rewrite the group's render buffers.
    fn advance(&mut self, tick: Tick);

    /// React to the visual-state toggle. Ambient groups keep the default
    /// no-op: the backdrop must stay calm through the morph.
    fn set_unleashed(&mut self, _released: bool) {}
}

/// The complete animated piece.
#[derive(Debug)]
pub struct Stage {
    config: TreeConfig,
    unleashed: bool,
    tree: TreeParticles,
    glow: GlowPoints,
    streamers: Streamers,
    snow: Snow,
    starfield: Starfield,
    rings: BaseRings,
    apex: StarApex,
}

impl Stage {
    /// Build a stage, generating every particle group from entropy.
    ///
    /// Fails fast on malformed configuration - see
    /// [`TreeConfig::validate`].
    pub fn new(config: TreeConfig) -> Result<Self, ConfigError> {
        Self::build(config, SpawnContext::new())
    }

    /// Build a stage with an explicit generation seed. Identical seeds and
    /// configs produce identical stages.
    pub fn with_seed(config: TreeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, SpawnContext::seeded(seed))
    }

    fn build(config: TreeConfig, mut ctx: SpawnContext) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree: TreeParticles::new(&config, &mut ctx),
            glow: GlowPoints::new(&config, &mut ctx),
            streamers: Streamers::new(&config, &mut ctx),
            snow: Snow::new(&config, &mut ctx),
            starfield: Starfield::new(&config, &mut ctx),
            rings: BaseRings::new(&config),
            apex: StarApex::new(&config),
            unleashed: false,
            config,
        })
    }

    /// Regenerate every group under a new configuration, e.g. after a size
    /// change. Buffers are re-allocated and detached; the visual state
    /// resets to contained.
    pub fn rebuild(&mut self, config: TreeConfig) -> Result<(), ConfigError> {
        *self = Self::build(config, SpawnContext::new())?;
        Ok(())
    }

    /// The active configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Whether the piece is currently released (scattered target).
    #[inline]
    pub fn is_unleashed(&self) -> bool {
        self.unleashed
    }

    /// Set the target visual state.
    ///
    /// Callable at any time, including mid-transition: controllers keep
    /// converging from wherever they are. Idempotent - repeating the current
    /// value changes nothing, and in particular does not restart the trail
    /// reveal.
    pub fn set_unleashed(&mut self, released: bool) {
        if released == self.unleashed {
            return;
        }
        self.unleashed = released;
        log::debug!("visual state -> {}", if released { "released" } else { "contained" });
        for group in self.groups_mut() {
            group.set_unleashed(released);
        }
    }

    /// Advance every group by one frame.
    ///
    /// Call once per rendered frame with the driver's timing. Groups whose
    /// buffers are not attached skip their write for this tick.
    pub fn update(&mut self, elapsed: f32, delta: f32) {
        let tick = Tick { elapsed, delta };
        for group in self.groups_mut() {
            group.advance(tick);
        }
    }

    /// Mark every group's buffers attached. Convenience for renderers that
    /// bring all their pipelines up at once.
    pub fn attach_all(&mut self) {
        self.tree.needle_buffers_mut().attach();
        self.tree.ornament_buffers_mut().attach();
        self.glow.buffers_mut().attach();
        self.streamers.buffers_mut().attach();
        self.snow.buffers_mut().attach();
        self.starfield.buffers_mut().attach();
        self.rings.buffers_mut().attach();
    }

    /// The morphing needle/ornament field.
    pub fn tree(&self) -> &TreeParticles {
        &self.tree
    }

    /// The morphing field, mutably.
    pub fn tree_mut(&mut self) -> &mut TreeParticles {
        &mut self.tree
    }

    /// The glow cloud.
    pub fn glow(&self) -> &GlowPoints {
        &self.glow
    }

    /// The glow cloud, mutably.
    pub fn glow_mut(&mut self) -> &mut GlowPoints {
        &mut self.glow
    }

    /// The trail streamers.
    pub fn streamers(&self) -> &Streamers {
        &self.streamers
    }

    /// The trail streamers, mutably.
    pub fn streamers_mut(&mut self) -> &mut Streamers {
        &mut self.streamers
    }

    /// The falling snow.
    pub fn snow(&self) -> &Snow {
        &self.snow
    }

    /// The falling snow, mutably.
    pub fn snow_mut(&mut self) -> &mut Snow {
        &mut self.snow
    }

    /// The backdrop starfield.
    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// The backdrop starfield, mutably.
    pub fn starfield_mut(&mut self) -> &mut Starfield {
        &mut self.starfield
    }

    /// The base rings.
    pub fn rings(&self) -> &BaseRings {
        &self.rings
    }

    /// The base rings, mutably.
    pub fn rings_mut(&mut self) -> &mut BaseRings {
        &mut self.rings
    }

    /// The apex star's current transform.
    pub fn apex_transform(&self) -> ApexTransform {
        self.apex.transform()
    }

    fn groups_mut(&mut self) -> [&mut dyn Animated; 7] {
        [
            &mut self.tree,
            &mut self.glow,
            &mut self.streamers,
            &mut self.snow,
            &mut self.starfield,
            &mut self.rings,
            &mut self.apex,
        ]
    }
}
