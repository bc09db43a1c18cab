//! Headless demo driver.
//!
//! Runs the stage for a few hundred fixed-delta frames, releasing the tree
//! halfway through, and logs how the morph progresses. Useful as a smoke
//! test and as a template for wiring a real render loop.

use tinsel::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut stage = Stage::with_seed(TreeConfig::default(), 7)?;
    stage.attach_all();

    let mut time = Time::new();
    time.set_fixed_delta(Some(1.0 / 60.0));

    for frame in 0..600u32 {
        if frame == 240 {
            stage.set_unleashed(true);
            log::info!("frame {frame}: releasing the tree");
        }
        let (elapsed, delta) = time.update();
        stage.update(elapsed, delta);

        if frame % 120 == 0 {
            log::info!(
                "frame {frame}: morph factor {:.3}, trail length {:.3}",
                stage.tree().morph().factor(),
                stage.streamers().reveal().length(stage.is_unleashed()),
            );
        }
    }

    let positions = stage.glow().buffers().positions();
    log::info!(
        "final glow sample: ({:.2}, {:.2}, {:.2}) across {} points",
        positions[0],
        positions[1],
        positions[2],
        stage.glow().buffers().len(),
    );
    Ok(())
}
