//! JSON configuration for time-domain sound field simulations

use crate::error::{FieldError, Result};
use crate::greens::{point_delayed, sum_image_contributions};
use crate::grid::{Axis, Grid};
use crate::image_sources::{BoxRoom, ImageSource, ImageSourceModel, NUM_WALLS};
use crate::output::{FieldResult, WeightedImage};
use crate::signal::DelayedSignal;
use crate::types::{Point3D, speed_of_sound_or_default};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete simulation configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Position of the real source
    pub source: Point3DConfig,
    /// Excitation signal
    pub signal: SignalConfig,
    /// Observed point in time (s)
    pub observation_time: f64,
    /// Evaluation grid
    pub grid: GridConfig,
    /// Enclosing room; free field when absent
    #[serde(default)]
    pub room: Option<RoomConfig>,
    /// Speed of sound (m/s); 343 m/s when absent
    #[serde(default)]
    pub speed_of_sound: Option<f64>,
    /// Simulation metadata
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// 3D point configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point3DConfig {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl From<Point3DConfig> for Point3D {
    fn from(p: Point3DConfig) -> Self {
        Point3D::new(p.x, p.y, p.z)
    }
}

impl From<Point3D> for Point3DConfig {
    fn from(p: Point3D) -> Self {
        Point3DConfig {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

/// Excitation signal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SignalConfig {
    /// Single unit sample
    #[serde(rename = "impulse")]
    Impulse {
        /// Sampling rate (Hz)
        samplerate: f64,
        /// Instant of the sample (s)
        #[serde(default)]
        time: f64,
    },
    /// Hann-windowed pulse
    #[serde(rename = "hann_pulse")]
    HannPulse {
        /// Sampling rate (Hz)
        samplerate: f64,
        /// Pulse duration (s)
        duration: f64,
        /// Instant of the first sample (s)
        #[serde(default)]
        time: f64,
    },
    /// Explicit audio samples
    #[serde(rename = "samples")]
    Samples {
        /// Mono audio data
        data: Vec<f64>,
        /// Sampling rate (Hz)
        samplerate: f64,
        /// Instant of the first sample (s)
        #[serde(default)]
        time: f64,
    },
}

impl SignalConfig {
    /// Convert to DelayedSignal
    pub fn to_signal(&self) -> Result<DelayedSignal> {
        match self {
            SignalConfig::Impulse { samplerate, time } => {
                DelayedSignal::impulse(*samplerate)?.delayed_to(*time)
            }
            SignalConfig::HannPulse {
                samplerate,
                duration,
                time,
            } => DelayedSignal::hann_pulse(*samplerate, *duration)?.delayed_to(*time),
            SignalConfig::Samples {
                data,
                samplerate,
                time,
            } => DelayedSignal::new(data.clone(), *samplerate, *time),
        }
    }
}

/// Regular evaluation grid configuration
///
/// Each axis is either a single coordinate or a `[min, max]` range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// X extent
    pub x: Axis,
    /// Y extent
    pub y: Axis,
    /// Z extent
    pub z: Axis,
    /// Distance between neighbouring points (m)
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

fn default_spacing() -> f64 {
    0.05
}

impl GridConfig {
    /// Convert to Grid
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_axes(self.x, self.y, self.z, self.spacing)
    }
}

/// Rectangular room configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Width (x-dimension)
    pub width: f64,
    /// Depth (y-dimension)
    pub depth: f64,
    /// Height (z-dimension)
    pub height: f64,
    /// Maximum number of reflections per image source
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    /// Wall reflection coefficients (-x, +x, -y, +y, -z, +z)
    #[serde(default = "default_reflection_coefficients")]
    pub reflection_coefficients: [f64; NUM_WALLS],
}

fn default_max_order() -> usize {
    2
}

fn default_reflection_coefficients() -> [f64; NUM_WALLS] {
    [1.0; NUM_WALLS]
}

impl RoomConfig {
    /// Side lengths `[width, depth, height]`
    pub fn dimensions(&self) -> [f64; 3] {
        [self.width, self.depth, self.height]
    }

    /// Convert to BoxRoom
    pub fn to_room(&self) -> BoxRoom {
        BoxRoom::new(self.dimensions()).with_reflection_coefficients(self.reflection_coefficients)
    }
}

/// Simulation metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Simulation description
    #[serde(default)]
    pub description: String,
    /// Author name
    #[serde(default)]
    pub author: String,
}

impl FieldConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: FieldConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Effective speed of sound (m/s)
    pub fn speed_of_sound(&self) -> f64 {
        speed_of_sound_or_default(self.speed_of_sound)
    }

    /// Check the configuration before running a simulation.
    ///
    /// The field functions themselves accept any input; this is where
    /// rooms, sources and media coming from files get rejected.
    pub fn validate(&self) -> Result<()> {
        if let Some(c) = self.speed_of_sound.filter(|c| !c.is_finite() || *c <= 0.0) {
            return Err(FieldError::InvalidSpeedOfSound { c });
        }
        self.signal.to_signal()?;
        self.grid.to_grid()?;

        if let Some(room) = &self.room {
            let dimensions = room.dimensions();
            if dimensions.iter().any(|&l| !l.is_finite() || l <= 0.0) {
                return Err(FieldError::InvalidRoom { dimensions });
            }
            if let Some((wall, &value)) = room
                .reflection_coefficients
                .iter()
                .enumerate()
                .find(|(_, c)| !c.is_finite())
            {
                return Err(FieldError::InvalidReflectionCoefficient { wall, value });
            }
            let source: Point3D = self.source.into();
            if !room.to_room().contains(&source) {
                return Err(FieldError::SourceOutsideRoom {
                    position: source.to_array(),
                    dimensions,
                });
            }
        }
        Ok(())
    }

    /// Validate and evaluate the pressure field
    pub fn evaluate(&self) -> Result<FieldResult> {
        self.validate()?;
        let signal = self.signal.to_signal()?;
        let grid = self.grid.to_grid()?;
        let source: Point3D = self.source.into();
        let t = self.observation_time;
        let c = Some(self.speed_of_sound());

        let (field, images) = match &self.room {
            Some(room_config) => {
                let room = room_config.to_room();
                let coeffs = room.reflection_coefficients();
                let sources = room.image_sources(&source, room_config.max_order);
                log::debug!(
                    "{} image sources up to order {} in a {:?} m room ({:.1} m^3)",
                    sources.len(),
                    room_config.max_order,
                    room.dimensions,
                    room.volume()
                );
                let field = sum_image_contributions(&sources, &coeffs, &signal, t, &grid, c);
                let images = sources
                    .into_iter()
                    .map(|image| WeightedImage {
                        strength: image.strength(&coeffs),
                        image,
                    })
                    .collect();
                (field, images)
            }
            None => {
                let field = point_delayed(&source, &signal, t, &grid, c);
                let image = WeightedImage {
                    image: ImageSource {
                        position: source,
                        wall_count: [0; NUM_WALLS],
                    },
                    strength: 1.0,
                };
                (field, vec![image])
            }
        };

        let result = FieldResult {
            observation_time: t,
            grid,
            field,
            images,
        };
        log::info!(
            "evaluated {} grid points from {} active sources, peak |p| = {:.6e}",
            result.grid.len(),
            result.num_active_images(),
            result.peak_pressure()
        );
        Ok(result)
    }
}

/// Default configuration: Hann pulse in a 5 x 4 x 2.5 m room, horizontal slice
pub fn create_default_config() -> FieldConfig {
    FieldConfig {
        source: Point3DConfig {
            x: 1.5,
            y: 1.2,
            z: 1.2,
        },
        signal: SignalConfig::HannPulse {
            samplerate: 44100.0,
            duration: 0.001,
            time: 0.0,
        },
        observation_time: 0.008,
        grid: GridConfig {
            x: Axis::Range(0.0, 5.0),
            y: Axis::Range(0.0, 4.0),
            z: Axis::Fixed(1.2),
            spacing: 0.05,
        },
        room: Some(RoomConfig {
            width: 5.0,
            depth: 4.0,
            height: 2.5,
            max_order: 2,
            reflection_coefficients: [0.8; NUM_WALLS],
        }),
        speed_of_sound: None,
        metadata: MetadataConfig {
            description: "Hann pulse in a rectangular room".to_string(),
            author: String::new(),
        },
    }
}
