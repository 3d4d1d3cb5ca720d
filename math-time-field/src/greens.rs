//! Time-domain point sources
//!
//! The 3D free-field Green's function of the wave equation is:
//! ```text
//! g(x - x_s, t) = δ(t - |x - x_s| / c) / (4π |x - x_s|)
//! ```
//!
//! Convolved with an excitation signal s(t), the pressure observed at x is
//! `s(t - r/c) / (4π r)`. A room is modelled by summing this over the
//! mirror image sources of the real source, each scaled by the product of
//! the reflection coefficients of the walls it was mirrored across.
//!
//! There is no guard at r = 0: a grid point located exactly on a source
//! evaluates to an infinite or NaN pressure.

use crate::error::Result;
use crate::grid::Grid;
use crate::image_sources::{BoxRoom, ImageSource, ImageSourceModel, NUM_WALLS};
use crate::parallel::parallel_sum_fields;
use crate::signal::{DelayedSignal, Excitation, as_delayed_signal};
use crate::types::{Point3D, speed_of_sound_or_default};
use ndarray::ArrayD;
use std::f64::consts::PI;

/// Sound pressure of a point source at `observation_time`
///
/// # Arguments
/// * `xs` - Source position
/// * `signal` - Excitation: `(data, samplerate)` or a [`DelayedSignal`]
/// * `observation_time` - Observed point in time (s)
/// * `grid` - Evaluation positions
/// * `c` - Speed of sound, [`crate::constants::SPEED_OF_SOUND`] if `None`
///
/// # Returns
/// Pressure with the shape of `grid`
///
/// # Example
/// ```
/// use math_time_field::{Grid, Point3D, point};
///
/// let grid = Grid::from_points(&[Point3D::new(3.43, 0.0, 0.0)]);
/// let p = point(Point3D::zero(), (vec![1.0, 1.0], 100.0), 0.015, &grid, None).unwrap();
/// assert!((p[[0]] - 1.0 / (4.0 * std::f64::consts::PI * 3.43)).abs() < 1e-9);
/// ```
pub fn point(
    xs: Point3D,
    signal: impl Into<Excitation>,
    observation_time: f64,
    grid: &Grid,
    c: Option<f64>,
) -> Result<ArrayD<f64>> {
    let signal = as_delayed_signal(signal)?;
    Ok(point_delayed(&xs, &signal, observation_time, grid, c))
}

/// [`point`] for an already normalized signal
pub fn point_delayed(
    xs: &Point3D,
    signal: &DelayedSignal,
    observation_time: f64,
    grid: &Grid,
    c: Option<f64>,
) -> ArrayD<f64> {
    let c = speed_of_sound_or_default(c);
    let base_time = observation_time - signal.time();
    grid.distances_to(xs).mapv_into(|r| {
        let weight = 1.0 / (4.0 * PI * r);
        let delay = r / c;
        weight * signal.sample_at(base_time - delay)
    })
}

/// Point source in a rectangular room using mirror image sources
///
/// # Arguments
/// * `x0` - Source position, expected inside the room (not checked)
/// * `signal` - Excitation: `(data, samplerate)` or a [`DelayedSignal`]
/// * `observation_time` - Observed point in time (s)
/// * `grid` - Evaluation positions
/// * `dimensions` - Room side lengths, the room spans `[0, L]` per axis
/// * `max_order` - Maximum number of reflections per image source
/// * `coeffs` - Wall reflection coefficients (-x, +x, -y, +y, -z, +z), all ones if `None`
/// * `c` - Speed of sound, [`crate::constants::SPEED_OF_SOUND`] if `None`
pub fn point_image_sources(
    x0: Point3D,
    signal: impl Into<Excitation>,
    observation_time: f64,
    grid: &Grid,
    dimensions: [f64; 3],
    max_order: usize,
    coeffs: Option<[f64; NUM_WALLS]>,
    c: Option<f64>,
) -> Result<ArrayD<f64>> {
    let coeffs = coeffs.unwrap_or([1.0; NUM_WALLS]);
    let room = BoxRoom::new(dimensions).with_reflection_coefficients(coeffs);
    superpose_image_sources(&room, x0, signal, observation_time, grid, max_order, c)
}

/// Sum the contributions of all images produced by `model`
pub fn superpose_image_sources<M: ImageSourceModel + ?Sized>(
    model: &M,
    x0: Point3D,
    signal: impl Into<Excitation>,
    observation_time: f64,
    grid: &Grid,
    max_order: usize,
    c: Option<f64>,
) -> Result<ArrayD<f64>> {
    let signal = as_delayed_signal(signal)?;
    let images = model.image_sources(&x0, max_order);
    log::debug!(
        "{} image sources up to order {} for source at ({:.3}, {:.3}, {:.3})",
        images.len(),
        max_order,
        x0.x,
        x0.y,
        x0.z
    );
    Ok(sum_image_contributions(
        &images,
        &model.reflection_coefficients(),
        &signal,
        observation_time,
        grid,
        c,
    ))
}

/// Weighted sum of free-field contributions of the given images.
///
/// Images whose strength is exactly zero are skipped. The result has the
/// shape of `grid`, and is all zeros when every image is suppressed.
pub fn sum_image_contributions(
    images: &[ImageSource],
    coeffs: &[f64; NUM_WALLS],
    signal: &DelayedSignal,
    observation_time: f64,
    grid: &Grid,
    c: Option<f64>,
) -> ArrayD<f64> {
    let active: Vec<(Point3D, f64)> = images
        .iter()
        .map(|image| (image.position, image.strength(coeffs)))
        .filter(|&(_, strength)| strength != 0.0)
        .collect();

    if active.len() < images.len() {
        log::debug!(
            "skipping {} of {} image sources with zero strength",
            images.len() - active.len(),
            images.len()
        );
    }

    parallel_sum_fields(&active, grid.shape(), |&(position, strength)| {
        point_delayed(&position, signal, observation_time, grid, c) * strength
    })
}
