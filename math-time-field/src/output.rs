//! Output JSON formatting for time-domain field simulations

use crate::config::{FieldConfig, SignalConfig};
use crate::grid::Grid;
use crate::image_sources::ImageSource;
use crate::parallel::is_parallel_available;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

/// Image source together with its amplitude factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightedImage {
    /// The image source
    pub image: ImageSource,
    /// Product of the reflection coefficients of the walls it was mirrored across
    pub strength: f64,
}

/// Result of one field evaluation
#[derive(Debug, Clone)]
pub struct FieldResult {
    /// Observed point in time (s)
    pub observation_time: f64,
    /// Evaluation grid
    pub grid: Grid,
    /// Sound pressure, shaped like the grid
    pub field: ArrayD<f64>,
    /// Real source and images with their strengths
    pub images: Vec<WeightedImage>,
}

impl FieldResult {
    /// Largest finite |p| over the grid
    pub fn peak_pressure(&self) -> f64 {
        self.field
            .iter()
            .filter(|p| p.is_finite())
            .fold(0.0, |peak, p| peak.max(p.abs()))
    }

    /// Number of grid points with an infinite or NaN pressure
    pub fn num_singular_points(&self) -> usize {
        self.field.iter().filter(|p| !p.is_finite()).count()
    }

    /// Number of sources with non-zero strength
    pub fn num_active_images(&self) -> usize {
        self.images.iter().filter(|w| w.strength != 0.0).count()
    }
}

/// Create output JSON for one evaluation
///
/// Non-finite pressures are written as `null`.
pub fn create_output_json(config: &FieldConfig, result: &FieldResult) -> serde_json::Value {
    let grid = &result.grid;

    serde_json::json!({
        "source": [config.source.x, config.source.y, config.source.z],
        "observation_time": result.observation_time,
        "speed_of_sound": config.speed_of_sound(),
        "room": config.room.as_ref().map(|room| serde_json::json!({
            "width": room.width,
            "depth": room.depth,
            "height": room.height,
            "max_order": room.max_order,
            "reflection_coefficients": room.reflection_coefficients,
        })),
        "grid": {
            "shape": grid.shape(),
            "x": grid.x().iter().copied().collect::<Vec<_>>(),
            "y": grid.y().iter().copied().collect::<Vec<_>>(),
            "z": grid.z().iter().copied().collect::<Vec<_>>(),
        },
        "field": {
            "shape": result.field.shape(),
            "pressure": result.field.iter().copied().collect::<Vec<_>>(),
            "peak": result.peak_pressure(),
            "singular_points": result.num_singular_points(),
        },
        "images": result.images.iter().map(|w| {
            serde_json::json!({
                "position": w.image.position.to_array(),
                "wall_count": w.image.wall_count,
                "order": w.image.order(),
                "strength": w.strength,
            })
        }).collect::<Vec<_>>(),
        "metadata": {
            "description": config.metadata.description,
            "author": config.metadata.author,
        },
    })
}

/// Print a human-readable summary of a configuration
pub fn print_config_summary(config: &FieldConfig) {
    println!("\n=== Configuration Summary ===");
    println!(
        "Source: ({:.2}, {:.2}, {:.2})",
        config.source.x, config.source.y, config.source.z
    );
    match &config.signal {
        SignalConfig::Impulse { samplerate, time } => {
            println!("Signal: impulse @ {:.0} Hz, t0 = {:.4} s", samplerate, time)
        }
        SignalConfig::HannPulse {
            samplerate,
            duration,
            time,
        } => println!(
            "Signal: Hann pulse {:.2} ms @ {:.0} Hz, t0 = {:.4} s",
            duration * 1e3,
            samplerate,
            time
        ),
        SignalConfig::Samples {
            data,
            samplerate,
            time,
        } => println!(
            "Signal: {} samples @ {:.0} Hz, t0 = {:.4} s",
            data.len(),
            samplerate,
            time
        ),
    }
    match &config.room {
        Some(room) => {
            println!(
                "Room: Rectangular {:.1}m × {:.1}m × {:.1}m",
                room.width, room.depth, room.height
            );
            println!("  Max order: {}", room.max_order);
            println!("  Reflection coefficients: {:?}", room.reflection_coefficients);
        }
        None => println!("Room: free field"),
    }
    println!("Observation time: {:.4} s", config.observation_time);
    println!("Speed of sound: {:.1} m/s", config.speed_of_sound());
    println!("Grid spacing: {:.3} m", config.grid.spacing);
    println!(
        "Superposition: {}",
        if is_parallel_available() {
            "parallel (rayon)"
        } else {
            "sequential"
        }
    );
}
