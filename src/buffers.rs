//! Render-ready buffers.
//!
//! Each particle group owns a set of flat `f32` arrays sized once at
//! construction and overwritten in place every tick - the tick loop never
//! allocates. The renderer polls the slices (or the `bytemuck` byte views for
//! direct upload), checks `needs_update`, and clears it with `mark_clean`
//! after uploading.
//!
//! Buffers start detached: until the rendering collaborator signals it is
//! ready (per group or via [`Stage::attach_all`](crate::Stage::attach_all)),
//! a group's per-tick write is skipped - never a crash for an unready group.

/// Flat buffers for a point-sprite group: positions, colors, sizes,
/// opacities.
#[derive(Debug)]
pub struct PointBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    opacities: Vec<f32>,
    len: usize,
    needs_update: bool,
    attached: bool,
}

impl PointBuffers {
    /// Allocate buffers for `len` points, detached.
    pub fn new(len: usize) -> Self {
        Self {
            positions: vec![0.0; len * 3],
            colors: vec![0.0; len * 3],
            sizes: vec![0.0; len],
            opacities: vec![0.0; len],
            len,
            needs_update: false,
            attached: false,
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the group holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mark the rendering collaborator ready for this group.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Mark the rendering collaborator unavailable; per-tick writes are
    /// skipped until re-attached.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Whether per-tick writes currently land in this buffer.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the buffers changed since the last `mark_clean`.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Clear the redraw flag after uploading.
    pub fn mark_clean(&mut self) {
        self.needs_update = false;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.needs_update = true;
    }

    /// Positions, 3 floats per point.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Colors, 3 floats per point.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Sizes, 1 float per point.
    #[inline]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Opacities, 1 float per point.
    #[inline]
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Position bytes for direct upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color bytes for direct upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Size bytes for direct upload.
    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    /// Opacity bytes for direct upload.
    pub fn opacity_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.opacities)
    }

    pub(crate) fn write_position(&mut self, index: usize, position: glam::Vec3) {
        self.positions[index * 3] = position.x;
        self.positions[index * 3 + 1] = position.y;
        self.positions[index * 3 + 2] = position.z;
    }

    pub(crate) fn write_color(&mut self, index: usize, color: glam::Vec3) {
        self.colors[index * 3] = color.x;
        self.colors[index * 3 + 1] = color.y;
        self.colors[index * 3 + 2] = color.z;
    }

    pub(crate) fn write_size(&mut self, index: usize, size: f32) {
        self.sizes[index] = size;
    }

    pub(crate) fn write_opacity(&mut self, index: usize, opacity: f32) {
        self.opacities[index] = opacity;
    }
}

/// Flat buffers for an instanced group: positions, Euler rotations, uniform
/// scales, colors.
#[derive(Debug)]
pub struct InstanceBuffers {
    positions: Vec<f32>,
    rotations: Vec<f32>,
    scales: Vec<f32>,
    colors: Vec<f32>,
    len: usize,
    needs_update: bool,
    attached: bool,
}

impl InstanceBuffers {
    /// Allocate buffers for `len` instances, detached.
    pub fn new(len: usize) -> Self {
        Self {
            positions: vec![0.0; len * 3],
            rotations: vec![0.0; len * 3],
            scales: vec![0.0; len],
            colors: vec![0.0; len * 3],
            len,
            needs_update: false,
            attached: false,
        }
    }

    /// Number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the group holds no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mark the rendering collaborator ready for this group.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Mark the rendering collaborator unavailable.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Whether per-tick writes currently land in this buffer.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the buffers changed since the last `mark_clean`.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Clear the redraw flag after uploading.
    pub fn mark_clean(&mut self) {
        self.needs_update = false;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.needs_update = true;
    }

    /// Positions, 3 floats per instance.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Euler rotations, 3 floats per instance.
    #[inline]
    pub fn rotations(&self) -> &[f32] {
        &self.rotations
    }

    /// Uniform scales, 1 float per instance.
    #[inline]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Colors, 3 floats per instance.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Position bytes for direct upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Rotation bytes for direct upload.
    pub fn rotation_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rotations)
    }

    /// Scale bytes for direct upload.
    pub fn scale_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.scales)
    }

    /// Color bytes for direct upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub(crate) fn write_instance(
        &mut self,
        index: usize,
        position: glam::Vec3,
        rotation: glam::Vec3,
        scale: f32,
    ) {
        self.positions[index * 3] = position.x;
        self.positions[index * 3 + 1] = position.y;
        self.positions[index * 3 + 2] = position.z;
        self.rotations[index * 3] = rotation.x;
        self.rotations[index * 3 + 1] = rotation.y;
        self.rotations[index * 3 + 2] = rotation.z;
        self.scales[index] = scale;
    }

    pub(crate) fn write_color(&mut self, index: usize, color: glam::Vec3) {
        self.colors[index * 3] = color.x;
        self.colors[index * 3 + 1] = color.y;
        self.colors[index * 3 + 2] = color.z;
    }
}
