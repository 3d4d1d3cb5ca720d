//! Snapshots of a pulse travelling through a rectangular room
//!
//! Evaluates the field on a horizontal slice at a few instants and prints
//! the peak pressure with and without wall reflections.
//!
//! Usage:
//!   cargo run --release --example room_snapshots

use math_time_field::{Axis, DelayedSignal, Grid, Point3D, point, point_image_sources};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let room = [5.0, 4.0, 2.5];
    let source = Point3D::new(1.5, 1.2, 1.2);
    let pulse = DelayedSignal::hann_pulse(44100.0, 0.001)?;
    let grid = Grid::from_axes(
        Axis::Range(0.0, room[0]),
        Axis::Range(0.0, room[1]),
        Axis::Fixed(1.0),
        0.05,
    )?;

    println!("{:>8}  {:>14}  {:>14}", "t (ms)", "free field", "room");
    for step in 1..=10 {
        let t = step as f64 * 0.002;
        let free = point(source, &pulse, t, &grid, None)?;
        let reverberant =
            point_image_sources(source, &pulse, t, &grid, room, 3, Some([0.8; 6]), None)?;
        let peak = |field: &ndarray::ArrayD<f64>| {
            field
                .iter()
                .filter(|p| p.is_finite())
                .fold(0.0_f64, |m, p| m.max(p.abs()))
        };
        println!(
            "{:>8.1}  {:>14.6e}  {:>14.6e}",
            t * 1e3,
            peak(&free),
            peak(&reverberant)
        );
    }

    Ok(())
}
