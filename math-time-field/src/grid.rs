//! Evaluation grids
//!
//! A grid is stored as three coordinate components that follow NumPy
//! broadcasting rules. Regular grids are kept sparse: the x component has
//! shape `(nx, 1, 1)`, y has `(1, ny, 1)` and z has `(1, 1, nz)`, so the
//! evaluated field has shape `(nx, ny, nz)` without materializing the
//! coordinates.

use crate::error::{FieldError, Result};
use crate::types::{Point3D, lin_space};
use ndarray::{Array1, Array3, ArrayD};
use serde::{Deserialize, Serialize};

/// Largest number of samples along one grid axis
pub const MAX_AXIS_SAMPLES: usize = 1 << 24;

/// Extent of a grid along one axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Axis {
    /// Single coordinate (a plane or line through the volume)
    Fixed(f64),
    /// Inclusive range `[min, max]`
    Range(f64, f64),
}

impl Axis {
    /// Coordinates along this axis for the given spacing
    pub fn samples(&self, spacing: f64) -> Result<Vec<f64>> {
        match *self {
            Axis::Fixed(value) if value.is_finite() => Ok(vec![value]),
            Axis::Fixed(value) => Err(FieldError::InvalidAxis {
                min: value,
                max: value,
            }),
            Axis::Range(min, max) => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(FieldError::InvalidAxis { min, max });
                }
                let intervals = ((max - min).abs() / spacing).round();
                if !intervals.is_finite() || intervals >= MAX_AXIS_SAMPLES as f64 {
                    return Err(FieldError::TooManyGridPoints { min, max, spacing });
                }
                Ok(lin_space(min, max, intervals as usize + 1))
            }
        }
    }
}

/// Three broadcast-compatible coordinate components
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x: ArrayD<f64>,
    y: ArrayD<f64>,
    z: ArrayD<f64>,
    shape: Vec<usize>,
}

impl Grid {
    /// Build a grid from three components, checking they broadcast together
    pub fn new(x: ArrayD<f64>, y: ArrayD<f64>, z: ArrayD<f64>) -> Result<Self> {
        let shape = broadcast_shape(&[x.shape(), y.shape(), z.shape()]).ok_or_else(|| {
            FieldError::GridShapeMismatch {
                x: x.shape().to_vec(),
                y: y.shape().to_vec(),
                z: z.shape().to_vec(),
            }
        })?;
        Ok(Self { x, y, z, shape })
    }

    /// Regular sparse grid spanning the given axes
    pub fn from_axes(x: Axis, y: Axis, z: Axis, spacing: f64) -> Result<Self> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(FieldError::InvalidSpacing { spacing });
        }
        let xs = x.samples(spacing)?;
        let ys = y.samples(spacing)?;
        let zs = z.samples(spacing)?;

        let gx = Array3::from_shape_fn((xs.len(), 1, 1), |(i, _, _)| xs[i]).into_dyn();
        let gy = Array3::from_shape_fn((1, ys.len(), 1), |(_, j, _)| ys[j]).into_dyn();
        let gz = Array3::from_shape_fn((1, 1, zs.len()), |(_, _, k)| zs[k]).into_dyn();

        Self::new(gx, gy, gz)
    }

    /// One-dimensional grid of scattered points (e.g. microphone positions)
    pub fn from_points(points: &[Point3D]) -> Self {
        let x = Array1::from_iter(points.iter().map(|p| p.x)).into_dyn();
        let y = Array1::from_iter(points.iter().map(|p| p.y)).into_dyn();
        let z = Array1::from_iter(points.iter().map(|p| p.z)).into_dyn();
        let shape = vec![points.len()];
        Self { x, y, z, shape }
    }

    /// Broadcast shape of the grid, which is also the shape of every field
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of evaluation points
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// `true` if the grid has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// X component as stored
    pub fn x(&self) -> &ArrayD<f64> {
        &self.x
    }

    /// Y component as stored
    pub fn y(&self) -> &ArrayD<f64> {
        &self.y
    }

    /// Z component as stored
    pub fn z(&self) -> &ArrayD<f64> {
        &self.z
    }

    /// Euclidean distance from `point` to every grid point
    pub fn distances_to(&self, point: &Point3D) -> ArrayD<f64> {
        let dx2 = self.x.mapv(|v| (v - point.x).powi(2));
        let dy2 = self.y.mapv(|v| (v - point.y).powi(2));
        let dz2 = self.z.mapv(|v| (v - point.z).powi(2));
        (&(&dx2 + &dy2) + &dz2).mapv_into(f64::sqrt)
    }
}

/// Broadcast shape of several array shapes, `None` if incompatible
pub fn broadcast_shape(shapes: &[&[usize]]) -> Option<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1; ndim];
    for shape in shapes {
        let offset = ndim - shape.len();
        for (i, &len) in shape.iter().enumerate() {
            let slot = &mut out[offset + i];
            if *slot == 1 {
                *slot = len;
            } else if len != 1 && len != *slot {
                return None;
            }
        }
    }
    Some(out)
}
