//! The morphing needle/ornament field.
//!
//! Blends every particle between its scattered and tree positions by the
//! eased morph factor, layers deterministic idle jitter on top (fading out as
//! the tree forms), and writes the results into two instance buffers - one
//! draw call for needles, one for ornaments.

use crate::buffers::InstanceBuffers;
use crate::config::TreeConfig;
use crate::morph::{mix, MorphController, MorphTarget};
use crate::particle::{Particle, ParticleKind};
use crate::spawn::{generate_particles, SpawnContext};
use crate::stage::{Animated, Tick};

/// Amplitude of the idle jitter at full scatter.
const JITTER_AMPLITUDE: f32 = 0.4;

/// The instanced tree field: needles and ornaments with a shared morph
/// controller.
#[derive(Debug)]
pub struct TreeParticles {
    needles: Vec<Particle>,
    ornaments: Vec<Particle>,
    morph: MorphController,
    needle_buffers: InstanceBuffers,
    ornament_buffers: InstanceBuffers,
}

impl TreeParticles {
    /// Generate the field and size its buffers.
    ///
    /// The generated particles are partitioned by kind so each tick walks
    /// two contiguous runs instead of branching per particle.
    pub fn new(config: &TreeConfig, ctx: &mut SpawnContext) -> Self {
        let particles = generate_particles(config, ctx);
        let (ornaments, needles): (Vec<_>, Vec<_>) = particles
            .into_iter()
            .partition(|p| p.kind == ParticleKind::Ornament);

        let mut needle_buffers = InstanceBuffers::new(needles.len());
        let mut ornament_buffers = InstanceBuffers::new(ornaments.len());
        for (i, p) in needles.iter().enumerate() {
            needle_buffers.write_color(i, p.color);
        }
        for (i, p) in ornaments.iter().enumerate() {
            ornament_buffers.write_color(i, p.color);
        }

        Self {
            needles,
            ornaments,
            morph: MorphController::new(MorphTarget::TreeShape, config.morph_rate),
            needle_buffers,
            ornament_buffers,
        }
    }

    /// The group's morph controller.
    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    /// Needle instance buffers.
    pub fn needle_buffers(&self) -> &InstanceBuffers {
        &self.needle_buffers
    }

    /// Needle instance buffers, mutably (attach/detach, mark_clean).
    pub fn needle_buffers_mut(&mut self) -> &mut InstanceBuffers {
        &mut self.needle_buffers
    }

    /// Ornament instance buffers.
    pub fn ornament_buffers(&self) -> &InstanceBuffers {
        &self.ornament_buffers
    }

    /// Ornament instance buffers, mutably.
    pub fn ornament_buffers_mut(&mut self) -> &mut InstanceBuffers {
        &mut self.ornament_buffers
    }

    /// The generated needles.
    pub fn needles(&self) -> &[Particle] {
        &self.needles
    }

    /// The generated ornaments.
    pub fn ornaments(&self) -> &[Particle] {
        &self.ornaments
    }
}

impl Animated for TreeParticles {
    fn advance(&mut self, tick: Tick) {
        self.morph.advance(tick.delta);
        let ease = self.morph.ease();
        write_instances(&self.needles, &mut self.needle_buffers, ease, tick.elapsed);
        write_instances(&self.ornaments, &mut self.ornament_buffers, ease, tick.elapsed);
    }

    fn set_unleashed(&mut self, released: bool) {
        self.morph.set_target(if released {
            MorphTarget::Scattered
        } else {
            MorphTarget::TreeShape
        });
    }
}

fn write_instances(particles: &[Particle], buffers: &mut InstanceBuffers, ease: f32, time: f32) {
    if !buffers.is_attached() {
        log::trace!("instance buffers not attached, skipping write");
        return;
    }

    let jitter = (1.0 - ease) * JITTER_AMPLITUDE;
    for (i, p) in particles.iter().enumerate() {
        let mut position = mix(p.scatter_position, p.tree_position, ease);
        // Deterministic noise: smooth, repeatable for a given time value,
        // gone once the tree fully forms.
        position.x += (time * 0.3 + p.scatter_position.x).sin() * jitter;
        position.y += (time * 0.4 + p.scatter_position.y).cos() * jitter;
        position.z += (time * 0.2 + p.scatter_position.z).sin() * jitter;

        // Linear blend in Euler space; fine for these small angular ranges,
        // not a shortest-arc interpolation.
        let rotation = mix(p.scatter_rotation, p.tree_rotation, ease);

        // The breathing term is always present, morphed or not.
        let scale = p.scale * (0.95 + 0.05 * (time * 3.0 + p.scatter_position.x).sin());

        buffers.write_instance(i, position, rotation, scale);
    }
    buffers.mark_dirty();
}
