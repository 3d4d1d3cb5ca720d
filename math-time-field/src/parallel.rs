//! Portable parallel reduction of sound fields
//!
//! - `native` feature: rayon map-reduce over contributions
//! - otherwise: sequential accumulation
//!
//! Summation order differs between the two paths, so results agree only up
//! to floating-point rounding.

use ndarray::{ArrayD, IxDyn};

/// Check if parallel processing is available
#[inline]
pub fn is_parallel_available() -> bool {
    cfg!(feature = "native")
}

/// Sum the fields produced by `f` for every item.
///
/// Returns zeros of `shape` when `items` is empty.
#[cfg(feature = "native")]
pub fn parallel_sum_fields<T, F>(items: &[T], shape: &[usize], f: F) -> ArrayD<f64>
where
    T: Sync,
    F: Fn(&T) -> ArrayD<f64> + Sync + Send,
{
    use rayon::prelude::*;
    items
        .par_iter()
        .map(f)
        .reduce(|| ArrayD::zeros(IxDyn(shape)), |acc, field| acc + field)
}

/// Sum the fields produced by `f` for every item (sequential fallback)
#[cfg(not(feature = "native"))]
pub fn parallel_sum_fields<T, F>(items: &[T], shape: &[usize], f: F) -> ArrayD<f64>
where
    F: Fn(&T) -> ArrayD<f64>,
{
    items
        .iter()
        .fold(ArrayD::zeros(IxDyn(shape)), |mut acc, item| {
            acc += &f(item);
            acc
        })
}
