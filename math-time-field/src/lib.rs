//! # Time-domain sound fields of point sources
//!
//! Scalar sound pressure radiated by a point source, sampled on a grid at a
//! given instant:
//!
//! - **Free field**: 3D Green's function `s(t - r/c) / (4πr)` ([`point`])
//! - **Rectangular rooms**: mirror image source model with per-wall
//!   reflection coefficients ([`point_image_sources`])
//! - **Pluggable enclosures**: any [`ImageSourceModel`] can feed the
//!   superposition ([`superpose_image_sources`])
//! - JSON configuration and output for the `time_field_simulator` binary
//!
//! With the default `native` feature the image sources are summed in
//! parallel with Rayon.
//!
//! # Example
//!
//! ```rust
//! use math_time_field::{Axis, DelayedSignal, Grid, Point3D, point_image_sources};
//!
//! let grid = Grid::from_axes(Axis::Range(0.0, 4.0), Axis::Range(0.0, 3.0), Axis::Fixed(1.2), 0.1)
//!     .unwrap();
//! let pulse = DelayedSignal::hann_pulse(44100.0, 0.001).unwrap();
//! let p = point_image_sources(
//!     Point3D::new(1.0, 1.0, 1.2),
//!     &pulse,
//!     0.005,
//!     &grid,
//!     [4.0, 3.0, 2.5],
//!     2,
//!     Some([0.9; 6]),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(p.shape(), grid.shape());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)] // Field functions mirror the physical parameter list

mod config;
mod error;
mod greens;
mod grid;
mod image_sources;
mod output;
pub mod parallel;
mod signal;
mod types;

pub use config::*;
pub use error::{FieldError, Result};
pub use greens::*;
pub use grid::*;
pub use image_sources::*;
pub use output::*;
pub use signal::*;
pub use types::*;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
