//! Morph state machines and blend helpers.
//!
//! [`MorphController`] is the primary state machine: one continuous factor
//! converging exponentially toward a two-state target. [`TrailReveal`] is the
//! secondary controller for the streamer trail: an elapsed-time accumulator
//! reset on every toggle flip, driving a one-shot eased ramp decoupled from
//! the primary factor.

/// The two logical targets of a morph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphTarget {
    /// Particles dispersed into the cloud. Factor converges to 0.
    Scattered,
    /// Particles formed into the tree. Factor converges to 1.
    TreeShape,
}

impl MorphTarget {
    /// The factor value this target converges to.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            MorphTarget::Scattered => 0.0,
            MorphTarget::TreeShape => 1.0,
        }
    }
}

/// Exponential convergence of a scalar factor toward a boolean target.
///
/// Every tick the factor moves a fraction `min(1, delta * rate)` of the
/// remaining distance: a first-order low-pass filter, smooth and
/// frame-rate independent. Transitions are never instantaneous, and
/// re-targeting mid-transition simply continues from the current factor.
#[derive(Debug, Clone)]
pub struct MorphController {
    factor: f32,
    target: MorphTarget,
    rate: f32,
}

impl MorphController {
    /// Create a controller already settled at `target`.
    pub fn new(target: MorphTarget, rate: f32) -> Self {
        Self { factor: target.value(), target, rate }
    }

    /// Current morph factor in [0, 1].
    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Current target state.
    #[inline]
    pub fn target(&self) -> MorphTarget {
        self.target
    }

    /// Retarget the controller. Safe at any time; an in-flight transition
    /// continues converging toward the new target from wherever the factor
    /// currently sits.
    pub fn set_target(&mut self, target: MorphTarget) {
        self.target = target;
    }

    /// Advance one tick and return the new factor.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let step = (delta * self.rate).min(1.0);
        self.factor += (self.target.value() - self.factor) * step;
        self.factor
    }

    /// Smoothstep-eased factor, used for all position blending to avoid
    /// velocity discontinuities at the endpoints.
    #[inline]
    pub fn ease(&self) -> f32 {
        smoothstep(self.factor.clamp(0.0, 1.0))
    }

    /// Whether the factor is within `epsilon` of the target.
    pub fn settled(&self, epsilon: f32) -> bool {
        (self.factor - self.target.value()).abs() < epsilon
    }
}

/// One-shot trail reveal for the streamer curves.
///
/// The accumulator resets to zero on every toggle flip. While released, the
/// trail regrows from a stub along an eased ramp; while contained, it stays
/// at full length.
#[derive(Debug, Clone)]
pub struct TrailReveal {
    elapsed: f32,
    rate: f32,
}

impl TrailReveal {
    /// Create a reveal with the given ramp speed.
    pub fn new(rate: f32) -> Self {
        Self { elapsed: 0.0, rate }
    }

    /// Accumulate tick time.
    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    /// Restart the ramp. Called on every toggle flip.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Time since the last flip.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Current trail length in [0.05, 1].
    pub fn length(&self, released: bool) -> f32 {
        if released {
            let progress = (self.elapsed * self.rate).min(1.0);
            lerp(0.05, 1.0, progress.powf(1.5))
        } else {
            1.0
        }
    }
}

/// Cubic smoothstep `t²(3 − 2t)` over [0, 1].
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// GLSL-style smoothstep between two edges.
#[inline]
pub fn smoothstep_between(edge0: f32, edge1: f32, x: f32) -> f32 {
    smoothstep(((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0))
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Endpoint-exact vector blend: `a` at t = 0 and `b` at t = 1, bitwise.
///
/// The `a + (b - a) * t` form can miss the endpoints by a rounding step;
/// position blending relies on landing on `tree_position` exactly at
/// factor 1.
#[inline]
pub fn mix(a: glam::Vec3, b: glam::Vec3, t: f32) -> glam::Vec3 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut morph = MorphController::new(MorphTarget::Scattered, 3.5);
        morph.set_target(MorphTarget::TreeShape);

        let mut previous = morph.factor();
        for _ in 0..1_000 {
            let factor = morph.advance(1.0 / 60.0);
            assert!(factor >= previous);
            assert!(factor <= 1.0);
            previous = factor;
        }
        assert!(morph.settled(1e-4));
        assert!((morph.factor() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn huge_delta_clamps_to_one_full_step() {
        let mut morph = MorphController::new(MorphTarget::Scattered, 3.5);
        morph.set_target(MorphTarget::TreeShape);
        // A 10-second frame still lands on the target, never past it.
        assert_eq!(morph.advance(10.0), 1.0);
    }

    #[test]
    fn retargeting_continues_from_current_factor() {
        let mut morph = MorphController::new(MorphTarget::Scattered, 3.5);
        morph.set_target(MorphTarget::TreeShape);
        for _ in 0..10 {
            morph.advance(1.0 / 60.0);
        }
        let mid = morph.factor();
        assert!(mid > 0.0 && mid < 1.0);

        morph.set_target(MorphTarget::Scattered);
        let next = morph.advance(1.0 / 60.0);
        // One tick moves at most a rate-bounded fraction of the remainder.
        assert!(next < mid);
        assert!((mid - next) <= mid * 3.5 / 60.0 + 1e-6);
    }

    #[test]
    fn ease_hits_exact_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn mix_is_endpoint_exact() {
        let a = Vec3::new(0.1, -2.7, 3.3);
        let b = Vec3::new(-4.9, 5.1, -0.3);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
    }

    #[test]
    fn trail_reveal_ramps_only_while_released() {
        let mut reveal = TrailReveal::new(0.8);
        assert_eq!(reveal.length(false), 1.0);

        reveal.reset();
        assert!((reveal.length(true) - 0.05).abs() < 1e-6);
        reveal.advance(0.5);
        let mid = reveal.length(true);
        assert!(mid > 0.05 && mid < 1.0);
        reveal.advance(10.0);
        assert_eq!(reveal.length(true), 1.0);
        // Containment snaps the trail back to full length.
        assert_eq!(reveal.length(false), 1.0);
    }

    #[test]
    fn smoothstep_between_clamps_outside_the_window() {
        assert_eq!(smoothstep_between(0.2, 0.4, 0.0), 0.0);
        assert_eq!(smoothstep_between(0.2, 0.4, 1.0), 1.0);
        let mid = smoothstep_between(0.2, 0.4, 0.3);
        assert!((mid - 0.5).abs() < 1e-6);
    }
}
