//! Point picking demo
//!
//! Loads a raw binary16 point buffer (or builds a synthetic one), downsamples it and
//! picks the sample under a pointer position in an 800x450 viewport.
//!
//! ```text
//! RUST_LOG=debug cargo run --bin pick_demo -- --points 200000 --pointer-x 420 --pointer-y 200
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use half::f16;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewcrate_algorithms::{read_half_float_file, sample_half_float_points};
use viewcrate_core::{Point3d, SamplerConfig, DEFAULT_TARGET_SAMPLE_COUNT};
use viewcrate_interaction::Camera;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pick the nearest point cloud sample under a pointer")]
struct Args {
    /// Raw little-endian binary16 xyz triples; a synthetic sphere is used when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Points in the synthetic cloud
    #[arg(long, default_value_t = 120_000)]
    points: usize,

    /// Upper bound on retained samples
    #[arg(long, default_value_t = DEFAULT_TARGET_SAMPLE_COUNT)]
    target: usize,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    #[arg(long, default_value_t = 400.0)]
    pointer_x: f64,

    #[arg(long, default_value_t = 225.0)]
    pointer_y: f64,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 450.0)]
    height: f64,

    /// Max perpendicular distance between the pick ray and a sample, world units
    #[arg(long, default_value_t = 0.05)]
    pick_radius: f64,
}

/// Points on a unit sphere, packed as binary16 triples
fn synthetic_sphere(count: usize, seed: u64) -> Vec<u16> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = Vec::with_capacity(count * 3);

    for _ in 0..count {
        let theta = rng.gen_range(0.0..2.0 * PI);
        let z: f64 = rng.gen_range(-1.0..1.0);
        let ring = (1.0 - z * z).sqrt();
        for component in [ring * theta.cos(), ring * theta.sin(), z] {
            buffer.push(f16::from_f64(component).to_bits());
        }
    }
    buffer
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = SamplerConfig {
        target_sample_count: args.target,
    };

    let sampled = match &args.input {
        Some(path) => read_half_float_file(path, config.target_sample_count)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let buffer = synthetic_sphere(args.points, args.seed);
            sample_half_float_points(&buffer, None, config.target_sample_count)
                .context("point buffer produced no samples")?
        }
    };
    info!(
        "Kept {} of {} points (stride {})",
        sampled.sampled_point_count, sampled.source_point_count, sampled.stride
    );

    let camera = Camera {
        aspect_ratio: args.width / args.height,
        ..Camera::default()
    };
    let budget = args.pick_radius * args.pick_radius;

    let Some(pick) = camera.pick_sample(
        &sampled.samples,
        (args.pointer_x, args.pointer_y),
        (args.width, args.height),
        budget,
    ) else {
        bail!(
            "no sample within {} of the ray under ({}, {})",
            args.pick_radius,
            args.pointer_x,
            args.pointer_y
        );
    };

    let position: Point3d = pick.hit.position;
    info!(
        "Picked sample {} at ({:.3}, {:.3}, {:.3})",
        pick.hit.index, position.x, position.y, position.z
    );
    info!(
        "Ray distance {:.4}, off-ray {:.5}, {:.1}px from pointer",
        pick.hit.ray_distance,
        pick.hit.distance_sq.sqrt(),
        pick.screen_distance_px
    );

    Ok(())
}
