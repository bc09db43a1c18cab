//! End-to-end properties of the animated stage.

use tinsel::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn small_config() -> TreeConfig {
    TreeConfig::default()
        .with_needle_count(300)
        .with_ornament_count(20)
        .with_glow_count(200)
        .with_snow_count(50)
        .with_star_count(50)
}

fn needle_positions(stage: &Stage) -> Vec<f32> {
    stage.tree().needle_buffers().positions().to_vec()
}

fn max_point_delta(a: &[f32], b: &[f32]) -> f32 {
    a.chunks_exact(3)
        .zip(b.chunks_exact(3))
        .map(|(p, q)| {
            let dx = p[0] - q[0];
            let dy = p[1] - q[1];
            let dz = p[2] - q[2];
            (dx * dx + dy * dy + dz * dz).sqrt()
        })
        .fold(0.0f32, f32::max)
}

#[test]
fn release_and_containment_both_converge() {
    let mut stage = Stage::with_seed(small_config(), 11).unwrap();
    stage.attach_all();

    stage.set_unleashed(true);
    let mut elapsed = 0.0;
    let mut previous = stage.tree().morph().factor();
    for _ in 0..600 {
        elapsed += DT;
        stage.update(elapsed, DT);
        let factor = stage.tree().morph().factor();
        assert!(factor <= previous, "release must converge monotonically");
        assert!(factor >= 0.0);
        previous = factor;
    }
    assert!(stage.tree().morph().factor() < 1e-3);

    stage.set_unleashed(false);
    for _ in 0..600 {
        elapsed += DT;
        stage.update(elapsed, DT);
    }
    assert!((stage.tree().morph().factor() - 1.0).abs() < 1e-3);
}

#[test]
fn retargeting_mid_transition_never_jumps() {
    let mut stage = Stage::with_seed(small_config(), 12).unwrap();
    stage.attach_all();

    let mut elapsed = 0.0;
    stage.set_unleashed(true);
    for _ in 0..30 {
        elapsed += DT;
        stage.update(elapsed, DT);
    }
    let factor = stage.tree().morph().factor();
    assert!(factor > 0.05 && factor < 0.95, "toggle must land mid-transition");

    // Flip back mid-flight and watch the very next tick: the blend keeps
    // converging from where it sits, so per-particle movement stays within
    // a rate-derived velocity bound instead of snapping.
    stage.set_unleashed(false);
    let before = needle_positions(&stage);
    elapsed += DT;
    stage.update(elapsed, DT);
    let after = needle_positions(&stage);

    let config = stage.config();
    // Largest possible blend movement in one tick: the eased factor moves at
    // most 1.5x the raw step, across at most the scatter/tree separation.
    let separation = config.scatter_radius + config.tree_height;
    let step = config.morph_rate * DT;
    let bound = 1.5 * step * separation + 0.5;
    assert!(
        max_point_delta(&before, &after) < bound,
        "per-tick movement exceeded the velocity bound"
    );
}

#[test]
fn repeated_release_matches_a_single_release() {
    let config = small_config();
    let mut once = Stage::with_seed(config.clone(), 13).unwrap();
    let mut twice = Stage::with_seed(config, 13).unwrap();
    once.attach_all();
    twice.attach_all();

    let mut elapsed = 0.0;
    for frame in 0..240 {
        if frame == 30 {
            once.set_unleashed(true);
            twice.set_unleashed(true);
        }
        if frame == 31 {
            // The duplicate call must not reset any controller.
            twice.set_unleashed(true);
        }
        elapsed += DT;
        once.update(elapsed, DT);
        twice.update(elapsed, DT);
    }

    assert_eq!(needle_positions(&once), needle_positions(&twice));
    assert_eq!(
        once.streamers().buffers().positions(),
        twice.streamers().buffers().positions()
    );
    assert_eq!(
        once.streamers().buffers().opacities(),
        twice.streamers().buffers().opacities()
    );
}

#[test]
fn mid_height_particles_respect_the_taper() {
    let config = TreeConfig::default()
        .with_tree_height(11.0)
        .with_tree_radius(5.5);
    let mut ctx = SpawnContext::seeded(14);
    let particles = generate_particles(&config, &mut ctx);

    for p in &particles {
        // A particle halfway up the cone may sit at most half the base
        // radius from the axis.
        if p.tree_position.y.abs() < 0.05 {
            let radial =
                (p.tree_position.x * p.tree_position.x + p.tree_position.z * p.tree_position.z)
                    .sqrt();
            assert!(radial <= 5.5 / 2.0 + 0.05);
        }
    }
}

#[test]
fn settled_stage_writes_tree_positions_exactly() {
    let mut stage = Stage::with_seed(small_config(), 15).unwrap();
    stage.attach_all();
    stage.update(2.5, DT);

    let positions = stage.tree().needle_buffers().positions();
    for (i, p) in stage.tree().needles().iter().enumerate() {
        assert_eq!(positions[i * 3], p.tree_position.x);
        assert_eq!(positions[i * 3 + 1], p.tree_position.y);
        assert_eq!(positions[i * 3 + 2], p.tree_position.z);
    }
}

#[test]
fn ambient_groups_ignore_the_toggle() {
    let config = small_config();
    let mut toggled = Stage::with_seed(config.clone(), 16).unwrap();
    let mut steady = Stage::with_seed(config, 16).unwrap();
    toggled.attach_all();
    steady.attach_all();

    let mut elapsed = 0.0;
    for frame in 0..120 {
        if frame == 10 {
            toggled.set_unleashed(true);
        }
        elapsed += DT;
        toggled.update(elapsed, DT);
        steady.update(elapsed, DT);
    }

    assert_eq!(
        toggled.snow().buffers().positions(),
        steady.snow().buffers().positions()
    );
    assert_eq!(
        toggled.rings().buffers().positions(),
        steady.rings().buffers().positions()
    );
    assert_eq!(toggled.apex_transform(), steady.apex_transform());
}

#[test]
fn detached_group_skips_while_others_write() {
    let mut stage = Stage::with_seed(small_config(), 17).unwrap();
    stage.attach_all();
    stage.glow_mut().buffers_mut().detach();

    stage.update(0.1, DT);
    assert!(!stage.glow().buffers().needs_update());
    assert!(stage.tree().needle_buffers().needs_update());
    assert!(stage.snow().buffers().needs_update());
}
