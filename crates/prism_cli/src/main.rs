mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use log::LevelFilter;
use prism_renderer::{render, writer_for_path};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    log::info!("Starting Prism ({:?})", args.scene);

    // Fail before rendering rather than after
    let writer = writer_for_path(&args.output)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut scene_rng = StdRng::seed_from_u64(seed);

    let build_start = Instant::now();
    let mut setup = scenes::build(args.scene, &mut scene_rng);
    log::info!("Scene built in {:.2?}", build_start.elapsed());

    if let Some(width) = args.width {
        setup.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        setup.camera.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        setup.camera.max_depth = depth;
    }
    setup.camera.initialize();

    setup.config.seed = Some(seed);
    setup.config.schedule = args.schedule.into();

    let render_start = Instant::now();
    let image = render(
        &setup.camera,
        setup.world.as_ref(),
        setup.lights.as_deref(),
        &setup.config,
    );
    log::info!("Render time: {:.2?}", render_start.elapsed());

    if let Err(err) = writer.write_file(&image, &args.output) {
        log::error!("Failed to write {}: {}", args.output.display(), err);
        return Err(err).with_context(|| format!("Writing {}", args.output.display()));
    }

    log::info!("Wrote {}", args.output.display());
    Ok(())
}
