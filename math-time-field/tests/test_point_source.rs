//! Free-field point source tests
//!
//! Checks the 1/r spreading law, causality of the retarded-time sampling
//! and the behaviour at a grid point that coincides with the source.

use approx::assert_relative_eq;
use math_time_field::{
    Axis, DelayedSignal, Grid, Point3D, constants::SPEED_OF_SOUND, point, point_delayed,
};
use std::f64::consts::PI;

#[test]
fn test_pressure_decays_as_inverse_distance() {
    let fs = 48000.0;
    // Two equal samples: flat between t = 0 and t = 1/fs
    let signal = DelayedSignal::new(vec![1.0, 1.0], fs, 0.0).unwrap();
    let source = Point3D::new(0.3, -0.2, 0.1);

    println!("\n=== 1/r spreading ===");
    for &r in &[0.05, 0.1, 0.5, 1.0, 2.0, 7.5, 20.0] {
        let grid = Grid::from_points(&[Point3D::new(source.x, source.y + r, source.z)]);
        let t = r / SPEED_OF_SOUND + 0.5 / fs;
        let p = point_delayed(&source, &signal, t, &grid, None);
        println!("r = {:6.2} m  p = {:.6e}  p*r = {:.6e}", r, p[[0]], p[[0]] * r);
        assert_relative_eq!(p[[0]] * r, 1.0 / (4.0 * PI), max_relative = 1e-9);
    }
}

#[test]
fn test_field_is_causal() {
    let fs = 1000.0;
    let signal = DelayedSignal::new(vec![1.0; 10], fs, 0.002).unwrap();
    let source = Point3D::zero();
    let observation_time = 0.012;
    let grid = Grid::from_axes(Axis::Range(0.05, 5.0), Axis::Fixed(0.0), Axis::Fixed(0.0), 0.0123)
        .unwrap();
    let p = point_delayed(&source, &signal, observation_time, &grid, None);
    let r = grid.distances_to(&source);

    let mut silent = 0;
    let mut sounding = 0;
    for (&pressure, &distance) in p.iter().zip(r.iter()) {
        let retarded = observation_time - signal.time() - distance / SPEED_OF_SOUND;
        if retarded < -1e-9 || retarded > signal.duration() + 1e-9 {
            assert_eq!(pressure, 0.0, "r = {distance}: retarded time {retarded} outside support");
            silent += 1;
        } else if retarded > 1e-9 && retarded < signal.duration() - 1e-9 {
            assert_relative_eq!(pressure, 1.0 / (4.0 * PI * distance), max_relative = 1e-9);
            sounding += 1;
        }
    }
    // Wavefront passes through the middle of the line
    assert!(silent > 0);
    assert!(sounding > 0);
}

#[test]
fn test_before_emission_is_silent() {
    let signal = DelayedSignal::hann_pulse(44100.0, 0.002).unwrap().delayed_to(1.0).unwrap();
    let grid = Grid::from_axes(Axis::Range(-1.0, 1.0), Axis::Range(-1.0, 1.0), Axis::Fixed(0.5), 0.25)
        .unwrap();
    let p = point_delayed(&Point3D::zero(), &signal, 0.99, &grid, None);
    assert!(p.iter().all(|&v| v == 0.0));
}

#[test]
fn test_field_shape_matches_grid() {
    let grid = Grid::from_axes(Axis::Range(0.0, 1.0), Axis::Fixed(2.0), Axis::Range(0.0, 0.5), 0.1)
        .unwrap();
    let p = point(Point3D::new(0.5, 0.5, 0.5), (vec![1.0, 0.5], 8000.0), 0.003, &grid, None).unwrap();
    assert_eq!(p.shape(), grid.shape());
    assert_eq!(p.shape(), &[11, 1, 6]);
}

#[test]
fn test_speed_of_sound_override() {
    let grid = Grid::from_points(&[Point3D::new(2.0, 0.0, 0.0)]);
    let signal = DelayedSignal::new(vec![0.0, 1.0, 0.0], 100.0, 0.0).unwrap();
    // c = 200 m/s: delay 10 ms, which puts the peak (sample 1) at t = 20 ms
    let p = point_delayed(&Point3D::zero(), &signal, 0.02, &grid, Some(200.0));
    assert_relative_eq!(p[[0]], 1.0 / (8.0 * PI), max_relative = 1e-9);
    // Default c: the same instant is far from the peak
    let p_default = point_delayed(&Point3D::zero(), &signal, 0.02, &grid, None);
    assert!(p_default[[0]] < p[[0]]);
}

#[test]
fn test_coincident_grid_point_is_not_finite() {
    // No guard at r = 0: infinite weight times the sampled value
    let source = Point3D::new(1.0, 1.0, 1.0);
    let grid = Grid::from_points(&[source, Point3D::new(2.0, 1.0, 1.0)]);
    let signal = DelayedSignal::new(vec![1.0, 1.0], 100.0, 0.0).unwrap();
    let p = point_delayed(&source, &signal, 0.005, &grid, None);
    assert!(p[[0]].is_infinite());
    assert!(p[[1]].is_finite());

    // Silent signal at r = 0 gives inf * 0 = NaN
    let p_silent = point_delayed(&source, &signal, 10.0, &grid, None);
    assert!(p_silent[[0]].is_nan());
    assert_eq!(p_silent[[1]], 0.0);
}

#[test]
fn test_empty_signal_gives_zero_field() {
    let grid = Grid::from_points(&[Point3D::new(1.0, 0.0, 0.0), Point3D::new(0.0, 3.0, 0.0)]);
    let p = point(Point3D::zero(), (Vec::<f64>::new(), 1000.0), 0.01, &grid, None).unwrap();
    assert!(p.iter().all(|&v| v == 0.0));
}
