//! The particle descriptor produced by generation.

use glam::Vec3;

/// What a particle in the morphing field is drawn as.
///
/// Needles are thin tapered cylinders, ornaments are spheres; the renderer
/// issues one instanced draw call per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Thin needle instance, the bulk of the field.
    Needle,
    /// Spherical ornament instance, a few percent of the field.
    Ornament,
}

/// One particle of the morphing field. Immutable once generated.
///
/// The two position fields never change after generation: all visible motion
/// is a deterministic function of (particle, morph factor, elapsed time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in the dispersed configuration.
    pub scatter_position: Vec3,
    /// Position in the cone-shaped tree configuration.
    pub tree_position: Vec3,
    /// Euler orientation in the dispersed configuration, random per axis.
    pub scatter_rotation: Vec3,
    /// Euler orientation in the tree configuration, radially aligned.
    pub tree_rotation: Vec3,
    /// Base scale, drawn from a kind-dependent range.
    pub scale: f32,
    /// Needle or ornament.
    pub kind: ParticleKind,
    /// Color assigned once at generation from the palette.
    pub color: Vec3,
}
