//! Excitation signals for time-domain sources
//!
//! A [`DelayedSignal`] is mono audio data, its sampling rate and the instant
//! at which its first sample occurs. Sources accept either a raw
//! `(data, samplerate)` pair or a ready-made [`DelayedSignal`] through the
//! [`Excitation`] enum, which is normalized once by [`as_delayed_signal`].

use crate::error::{FieldError, Result};
use ndarray::Array1;
use std::f64::consts::PI;

/// Largest number of samples a generated pulse may have
pub const MAX_PULSE_SAMPLES: usize = 1 << 28;

/// Sampled signal with a causal time offset
#[derive(Debug, Clone, PartialEq)]
pub struct DelayedSignal {
    data: Array1<f64>,
    samplerate: f64,
    time: f64,
}

impl DelayedSignal {
    /// Create a signal whose sample 0 occurs at `time` seconds
    pub fn new(data: impl Into<Array1<f64>>, samplerate: f64, time: f64) -> Result<Self> {
        if !samplerate.is_finite() || samplerate <= 0.0 {
            return Err(FieldError::InvalidSampleRate { samplerate });
        }
        if !time.is_finite() {
            return Err(FieldError::InvalidTimeOffset { time });
        }
        Ok(Self {
            data: data.into(),
            samplerate,
            time,
        })
    }

    /// Single unit sample at t = 0
    pub fn impulse(samplerate: f64) -> Result<Self> {
        Self::new(vec![1.0], samplerate, 0.0)
    }

    /// Hann-windowed pulse of the given duration, peak value 1
    pub fn hann_pulse(samplerate: f64, duration: f64) -> Result<Self> {
        if !samplerate.is_finite() || samplerate <= 0.0 {
            return Err(FieldError::InvalidSampleRate { samplerate });
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(FieldError::InvalidDuration { duration });
        }
        let samples = (duration * samplerate).round();
        if !samples.is_finite() || samples > MAX_PULSE_SAMPLES as f64 {
            return Err(FieldError::InvalidDuration { duration });
        }
        let n = (samples as usize).max(1);
        let data = if n == 1 {
            Array1::ones(1)
        } else {
            Array1::from_shape_fn(n, |i| {
                0.5 * (1.0 - (2.0 * PI * i as f64 / (n - 1) as f64).cos())
            })
        };
        Self::new(data, samplerate, 0.0)
    }

    /// Return a copy of this signal starting at `time`
    pub fn delayed_to(&self, time: f64) -> Result<Self> {
        Self::new(self.data.clone(), self.samplerate, time)
    }

    /// Audio samples
    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    /// Sampling rate in Hz
    pub fn samplerate(&self) -> f64 {
        self.samplerate
    }

    /// Instant of sample 0 in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the signal has no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Time span between the first and the last sample
    pub fn duration(&self) -> f64 {
        self.len().saturating_sub(1) as f64 / self.samplerate
    }

    /// Instant of the last sample on the global clock
    pub fn end_time(&self) -> f64 {
        self.time + self.duration()
    }

    /// Linearly interpolated value at local time `t` (seconds after sample 0).
    ///
    /// Times before the first sample or after the last one evaluate to zero.
    /// The boundary instants themselves return the boundary samples.
    pub fn sample_at(&self, t: f64) -> f64 {
        let n = self.data.len();
        if n == 0 {
            return 0.0;
        }
        if t.is_nan() {
            return f64::NAN;
        }
        let last = (n - 1) as f64 / self.samplerate;
        if t < 0.0 || t > last {
            return 0.0;
        }

        let pos = t * self.samplerate;
        let i = (pos.floor() as usize).min(n - 1);
        if i == n - 1 {
            return self.data[n - 1];
        }
        let frac = pos - i as f64;
        self.data[i] + frac * (self.data[i + 1] - self.data[i])
    }
}

/// Excitation accepted by the source models
#[derive(Debug, Clone)]
pub enum Excitation {
    /// Raw audio data and sampling rate; sample 0 occurs at t = 0
    Samples {
        /// Audio samples
        data: Array1<f64>,
        /// Sampling rate in Hz
        samplerate: f64,
    },
    /// Signal with an explicit causal offset
    Delayed(DelayedSignal),
}

impl From<DelayedSignal> for Excitation {
    fn from(signal: DelayedSignal) -> Self {
        Excitation::Delayed(signal)
    }
}

impl From<&DelayedSignal> for Excitation {
    fn from(signal: &DelayedSignal) -> Self {
        Excitation::Delayed(signal.clone())
    }
}

impl From<(Array1<f64>, f64)> for Excitation {
    fn from((data, samplerate): (Array1<f64>, f64)) -> Self {
        Excitation::Samples { data, samplerate }
    }
}

impl From<(Vec<f64>, f64)> for Excitation {
    fn from((data, samplerate): (Vec<f64>, f64)) -> Self {
        Excitation::Samples {
            data: Array1::from(data),
            samplerate,
        }
    }
}

impl From<(&[f64], f64)> for Excitation {
    fn from((data, samplerate): (&[f64], f64)) -> Self {
        Excitation::Samples {
            data: Array1::from(data.to_vec()),
            samplerate,
        }
    }
}

/// Normalize any accepted excitation into a [`DelayedSignal`]
pub fn as_delayed_signal(signal: impl Into<Excitation>) -> Result<DelayedSignal> {
    match signal.into() {
        Excitation::Samples { data, samplerate } => DelayedSignal::new(data, samplerate, 0.0),
        Excitation::Delayed(signal) => Ok(signal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_samplerate() {
        let err = DelayedSignal::new(vec![1.0], 0.0, 0.0).unwrap_err();
        assert!(err.is_signal_error());
        assert!(DelayedSignal::new(vec![1.0], f64::NAN, 0.0).is_err());
        assert!(DelayedSignal::new(vec![1.0], 44100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_raw_pair_has_zero_offset() {
        let signal = as_delayed_signal((vec![0.0, 1.0, 0.0], 8000.0)).unwrap();
        assert_eq!(signal.time(), 0.0);
        assert_eq!(signal.samplerate(), 8000.0);
        assert_eq!(signal.len(), 3);
    }

    #[test]
    fn test_delayed_signal_passes_through() {
        let signal = DelayedSignal::new(vec![1.0, 2.0], 10.0, 0.25).unwrap();
        let normalized = as_delayed_signal(&signal).unwrap();
        assert_eq!(normalized, signal);
    }

    #[test]
    fn test_linear_interpolation() {
        let signal = DelayedSignal::new(vec![0.0, 2.0, 4.0, 0.0], 10.0, 0.0).unwrap();
        assert_relative_eq!(signal.sample_at(0.0), 0.0);
        assert_relative_eq!(signal.sample_at(0.05), 1.0, epsilon = 1e-12);
        assert_relative_eq!(signal.sample_at(0.1), 2.0, epsilon = 1e-12);
        assert_relative_eq!(signal.sample_at(0.25), 2.0, epsilon = 1e-12);
        assert_relative_eq!(signal.sample_at(0.3), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_outside_support() {
        let signal = DelayedSignal::new(vec![1.0, 1.0, 1.0], 100.0, 0.0).unwrap();
        assert_eq!(signal.sample_at(-1e-9), 0.0);
        assert_eq!(signal.sample_at(0.02 + 1e-9), 0.0);
        assert_eq!(signal.sample_at(0.02), 1.0);
        assert_eq!(signal.sample_at(0.0), 1.0);
    }

    #[test]
    fn test_empty_signal_is_silent() {
        let signal = DelayedSignal::new(Vec::<f64>::new(), 100.0, 0.0).unwrap();
        assert!(signal.is_empty());
        assert_eq!(signal.sample_at(0.0), 0.0);
        assert_eq!(signal.duration(), 0.0);
    }

    #[test]
    fn test_impulse() {
        let signal = DelayedSignal::impulse(1000.0).unwrap();
        assert_eq!(signal.sample_at(0.0), 1.0);
        assert_eq!(signal.sample_at(0.0005), 0.0);
    }

    #[test]
    fn test_hann_pulse() {
        let signal = DelayedSignal::hann_pulse(1000.0, 0.011).unwrap();
        assert_eq!(signal.len(), 11);
        assert_relative_eq!(signal.data()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(signal.data()[5], 1.0, epsilon = 1e-12);
        assert_relative_eq!(signal.data()[10], 0.0, epsilon = 1e-12);
        assert!(DelayedSignal::hann_pulse(1000.0, -1.0).is_err());
    }

    #[test]
    fn test_hann_pulse_too_long() {
        let err = DelayedSignal::hann_pulse(1e300, 1.0).unwrap_err();
        assert!(matches!(err, FieldError::InvalidDuration { .. }));
        let err = DelayedSignal::hann_pulse(f64::MAX, f64::MAX).unwrap_err();
        assert!(matches!(err, FieldError::InvalidDuration { .. }));
        let err = DelayedSignal::hann_pulse(f64::INFINITY, 0.001).unwrap_err();
        assert!(matches!(err, FieldError::InvalidSampleRate { .. }));
    }

    #[test]
    fn test_end_time() {
        let signal = DelayedSignal::new(vec![0.0; 11], 100.0, 0.5).unwrap();
        assert_relative_eq!(signal.duration(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(signal.end_time(), 0.6, epsilon = 1e-12);
        let moved = signal.delayed_to(1.0).unwrap();
        assert_relative_eq!(moved.end_time(), 1.1, epsilon = 1e-12);
    }
}
