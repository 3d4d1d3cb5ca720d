//! Mirror image sources for rectangular rooms
//!
//! The walls of a shoebox room are replaced by virtual sources obtained by
//! mirroring the real source across the walls (Allen & Berkley, 1979).
//! Along one axis with the source at normalized position `u = x / L`, the
//! image for lattice index `n` sits at `n + u` for even `n` and at
//! `n + 1 - u` for odd `n`, and has undergone `|n|` reflections split
//! between the lower and the upper wall.
//!
//! Walls are indexed `-x, +x, -y, +y, -z, +z`; the same order is used for
//! wall counts and reflection coefficients.

use crate::types::Point3D;
use serde::{Deserialize, Serialize};

/// Number of walls of a rectangular room
pub const NUM_WALLS: usize = 6;

/// Virtual source obtained by successive wall reflections
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImageSource {
    /// Position of the image
    pub position: Point3D,
    /// Reflections off each wall (-x, +x, -y, +y, -z, +z)
    pub wall_count: [u32; NUM_WALLS],
}

impl ImageSource {
    /// Total number of reflections
    pub fn order(&self) -> u32 {
        self.wall_count.iter().sum()
    }

    /// Reflections per axis pair `[x, y, z]`
    pub fn axis_order(&self) -> [u32; 3] {
        [
            self.wall_count[0] + self.wall_count[1],
            self.wall_count[2] + self.wall_count[3],
            self.wall_count[4] + self.wall_count[5],
        ]
    }

    /// Amplitude factor `∏ coeffs[w] ^ wall_count[w]`
    ///
    /// A zero coefficient on any wall this image touched makes the strength
    /// exactly zero; walls it never touched contribute a factor of one.
    pub fn strength(&self, coeffs: &[f64; NUM_WALLS]) -> f64 {
        coeffs
            .iter()
            .zip(self.wall_count.iter())
            .map(|(&c, &n)| c.powi(n as i32))
            .product()
    }
}

/// Strategy that enumerates the image sources of an enclosure
pub trait ImageSourceModel {
    /// All images of `source` with at most `max_order` reflections,
    /// including the real source itself (order 0)
    fn image_sources(&self, source: &Point3D, max_order: usize) -> Vec<ImageSource>;

    /// Reflection coefficient of each wall (-x, +x, -y, +y, -z, +z)
    fn reflection_coefficients(&self) -> [f64; NUM_WALLS];
}

/// Shoebox room spanning `[0, L]` along each axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoxRoom {
    /// Side lengths `[Lx, Ly, Lz]`
    pub dimensions: [f64; 3],
    /// Wall reflection coefficients (-x, +x, -y, +y, -z, +z)
    pub reflection_coefficients: [f64; NUM_WALLS],
}

impl BoxRoom {
    /// Lossless room with the given side lengths
    pub fn new(dimensions: [f64; 3]) -> Self {
        Self {
            dimensions,
            reflection_coefficients: [1.0; NUM_WALLS],
        }
    }

    /// Set the wall reflection coefficients
    pub fn with_reflection_coefficients(mut self, coeffs: [f64; NUM_WALLS]) -> Self {
        self.reflection_coefficients = coeffs;
        self
    }

    /// `true` if `point` lies strictly inside the room
    pub fn contains(&self, point: &Point3D) -> bool {
        point
            .to_array()
            .iter()
            .zip(self.dimensions.iter())
            .all(|(&p, &l)| p > 0.0 && p < l)
    }

    /// Room volume in cubic meters
    pub fn volume(&self) -> f64 {
        self.dimensions.iter().product()
    }
}

impl ImageSourceModel for BoxRoom {
    fn image_sources(&self, source: &Point3D, max_order: usize) -> Vec<ImageSource> {
        image_sources_for_box(source, &self.dimensions, max_order)
    }

    fn reflection_coefficients(&self) -> [f64; NUM_WALLS] {
        self.reflection_coefficients
    }
}

/// One-dimensional images in a unit box: (normalized coordinate, [lower, upper] reflections)
fn images_1d_unit_box(u: f64, max_order: usize) -> Vec<(f64, [u32; 2])> {
    let n = max_order as i64;
    (-n..=n)
        .map(|k| {
            let m = k.div_euclid(2);
            if k.rem_euclid(2) == 0 {
                (k as f64 + u, [m.unsigned_abs() as u32, m.unsigned_abs() as u32])
            } else {
                (
                    k as f64 + 1.0 - u,
                    [m.unsigned_abs() as u32, (m + 1).unsigned_abs() as u32],
                )
            }
        })
        .collect()
}

/// Full lattice of `(2N + 1)^3` images, reflected up to `max_order` times
/// between each pair of opposite walls.
///
/// Useful when images are selected by distance to a listener rather than by
/// total reflection count. Ordering is deterministic with x varying fastest.
pub fn image_sources_for_box_unpruned(
    source: &Point3D,
    dimensions: &[f64; 3],
    max_order: usize,
) -> Vec<ImageSource> {
    let [lx, ly, lz] = *dimensions;
    let xs = images_1d_unit_box(source.x / lx, max_order);
    let ys = images_1d_unit_box(source.y / ly, max_order);
    let zs = images_1d_unit_box(source.z / lz, max_order);

    let mut images = Vec::with_capacity(xs.len() * ys.len() * zs.len());
    for &(z, cz) in &zs {
        for &(y, cy) in &ys {
            for &(x, cx) in &xs {
                images.push(ImageSource {
                    position: Point3D::new(x * lx, y * ly, z * lz),
                    wall_count: [cx[0], cx[1], cy[0], cy[1], cz[0], cz[1]],
                });
            }
        }
    }
    images
}

/// Real source and all images reflected at most `max_order` times in total
pub fn image_sources_for_box(
    source: &Point3D,
    dimensions: &[f64; 3],
    max_order: usize,
) -> Vec<ImageSource> {
    image_sources_for_box_unpruned(source, dimensions, max_order)
        .into_iter()
        .filter(|image| (image.order() as usize) <= max_order)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_images_1d() {
        let images = images_1d_unit_box(0.3, 2);
        let coords: Vec<f64> = images.iter().map(|(a, _)| *a).collect();
        let expected = [-1.7, -0.3, 0.3, 1.7, 2.3];
        for (a, e) in coords.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-12);
        }
        let counts: Vec<[u32; 2]> = images.iter().map(|(_, c)| *c).collect();
        assert_eq!(counts, vec![[1, 1], [1, 0], [0, 0], [0, 1], [1, 1]]);
    }

    #[test]
    fn test_order_zero_is_real_source() {
        let source = Point3D::new(1.0, 2.0, 0.5);
        let images = image_sources_for_box(&source, &[4.0, 3.0, 2.5], 0);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].position, source);
        assert_eq!(images[0].wall_count, [0; NUM_WALLS]);
    }

    #[test]
    fn test_first_order_images() {
        let source = Point3D::new(1.0, 1.0, 1.0);
        let images = image_sources_for_box(&source, &[4.0, 3.0, 2.0], 1);
        // Real source plus one image per wall
        assert_eq!(images.len(), 7);

        let minus_x = images
            .iter()
            .find(|im| im.wall_count == [1, 0, 0, 0, 0, 0])
            .unwrap();
        assert_relative_eq!(minus_x.position.x, -1.0, epsilon = 1e-12);
        let plus_z = images
            .iter()
            .find(|im| im.wall_count == [0, 0, 0, 0, 0, 1])
            .unwrap();
        assert_relative_eq!(plus_z.position.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_image_count_closed_form() {
        // Octahedral number: lattice points with |i|+|j|+|k| <= N
        let source = Point3D::new(0.7, 1.3, 0.9);
        for n in 0..5usize {
            let count = image_sources_for_box(&source, &[2.0, 3.0, 1.5], n).len();
            let expected = (2 * n + 1) * (2 * n * n + 2 * n + 3) / 3;
            assert_eq!(count, expected);
        }
    }

    #[test]
    fn test_unpruned_lattice_size() {
        let images = image_sources_for_box_unpruned(&Point3D::new(1.0, 1.0, 1.0), &[2.0; 3], 2);
        assert_eq!(images.len(), 125);
        assert!(images.iter().any(|im| im.order() > 2));
    }

    #[test]
    fn test_axis_order_counts_room_lengths() {
        // Centered source: every reflection along an axis moves the image by one room length
        let source = Point3D::new(0.5, 0.5, 0.5);
        for image in image_sources_for_box(&source, &[1.0; 3], 3) {
            assert!(image.order() <= 3);
            let [ox, oy, oz] = image.axis_order();
            assert_relative_eq!((image.position.x - source.x).abs(), ox as f64, epsilon = 1e-12);
            assert_relative_eq!((image.position.y - source.y).abs(), oy as f64, epsilon = 1e-12);
            assert_relative_eq!((image.position.z - source.z).abs(), oz as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_strength() {
        let image = ImageSource {
            position: Point3D::zero(),
            wall_count: [2, 0, 1, 0, 0, 0],
        };
        let coeffs = [0.5, 0.0, 0.9, 1.0, 1.0, 1.0];
        assert_relative_eq!(image.strength(&coeffs), 0.25 * 0.9, epsilon = 1e-12);

        let touching_dead_wall = ImageSource {
            position: Point3D::zero(),
            wall_count: [0, 1, 0, 0, 0, 0],
        };
        assert_eq!(touching_dead_wall.strength(&coeffs), 0.0);
    }

    #[test]
    fn test_box_room_contains() {
        let room = BoxRoom::new([4.0, 3.0, 2.5]);
        assert!(room.contains(&Point3D::new(1.0, 1.0, 1.0)));
        assert!(!room.contains(&Point3D::new(0.0, 1.0, 1.0)));
        assert!(!room.contains(&Point3D::new(1.0, 3.5, 1.0)));
        assert_relative_eq!(room.volume(), 30.0);
        assert_eq!(room.reflection_coefficients(), [1.0; NUM_WALLS]);
    }
}
