//! Time-domain sound field simulator
//!
//! Evaluates the pressure of a point source (free field or rectangular room
//! with mirror image sources) on a grid at one instant and writes JSON.
//!
//! Usage:
//!   cargo run --release --bin time_field_simulator -- --config configs/room.json
//!   cargo run --release --bin time_field_simulator -- --time 0.01 --max-order 3
//!   RUST_LOG=debug cargo run --release --bin time_field_simulator -- --help

use clap::Parser;
use math_time_field::{FieldConfig, create_default_config, create_output_json, print_config_summary};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "time-field-simulator")]
#[command(about = "Time-domain sound field of a point source using mirror image sources", long_about = None)]
struct Args {
    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON file path
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Override the observation time (s)
    #[arg(long)]
    time: Option<f64>,

    /// Override the maximum reflection order
    #[arg(short = 'm', long)]
    max_order: Option<usize>,

    /// Ignore the room and compute the free field
    #[arg(long)]
    free_field: bool,

    /// Number of parallel threads (default: all cores)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        println!("Using {} threads\n", threads);
    }

    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {}", config_path.display());
        FieldConfig::from_file(config_path)?
    } else {
        println!("No configuration file specified, using default rectangular room");
        create_default_config()
    };

    if let Some(time) = args.time {
        config.observation_time = time;
    }
    if args.free_field {
        config.room = None;
    }
    if let (Some(max_order), Some(room)) = (args.max_order, config.room.as_mut()) {
        room.max_order = max_order;
    }

    print_config_summary(&config);

    println!("\n=== Running Simulation ===");
    let start = std::time::Instant::now();
    let result = config.evaluate()?;
    let elapsed = start.elapsed();

    println!("Grid points: {} {:?}", result.grid.len(), result.grid.shape());
    println!(
        "Sources: {} ({} active)",
        result.images.len(),
        result.num_active_images()
    );
    println!("Peak |p|: {:.6e}", result.peak_pressure());
    if result.num_singular_points() > 0 {
        log::warn!(
            "{} grid points coincide with a source and have no finite pressure",
            result.num_singular_points()
        );
    }
    if args.verbose {
        println!("Elapsed: {:.3} s", elapsed.as_secs_f64());
        for weighted in result.images.iter().filter(|w| w.strength != 0.0) {
            let p = weighted.image.position;
            println!(
                "  order {} at ({:.3}, {:.3}, {:.3}), strength {:.4}",
                weighted.image.order(),
                p.x,
                p.y,
                p.z,
                weighted.strength
            );
        }
    }

    println!("\nSaving results to: {}", args.output.display());
    let output = create_output_json(&config, &result);
    fs::write(&args.output, serde_json::to_string_pretty(&output)?)?;
    println!("Done!");

    Ok(())
}
