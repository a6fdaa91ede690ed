//! # Synthetic Process Modules
//!
//! `stochastic` holds the building blocks for generating linear time series
//! from seeded Gaussian noise.
//!
//! ## Modules
//!
//! | Module             | Description                                                                 |
//! |--------------------|-----------------------------------------------------------------------------|
//! | [`autoregressive`] | AR(p), MA(1) and ARMA(1)-like recurrences plus the free-function contracts. |
//! | [`coefficients`]   | Named, length-checked coefficient vectors.                                  |
//! | [`noise`]          | Seedable Gaussian noise sources.                                            |
//! | [`overlay`]        | Cosine seasonality and linear trend added after the recurrence pass.        |
//!
//! ## Example Usage
//!
//! ```rust
//! use synthetic_ts::stochastic::autoregressive::ar::ARp;
//! use synthetic_ts::stochastic::coefficients::Coefficients;
//! use synthetic_ts::stochastic::ProcessExt;
//!
//! let phi = Coefficients::from_slice(&[0.6]).unwrap();
//! let ar1 = ARp::new(phi, 1.0, 101, 42).unwrap();
//! let path = ar1.sample().unwrap();
//! ```
pub mod autoregressive;
pub mod coefficients;
pub mod noise;
pub mod overlay;

use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Normal;

use crate::error::Result;
use crate::error::SynthError;

pub use crate::traits::FloatExt;
pub use crate::traits::NoiseSource;
pub use crate::traits::ProcessExt;

/// Default number of time steps
pub const N: usize = 100;
/// Default noise standard deviation
pub const SIGMA: f64 = 1.0;
/// Default seed
pub const SEED: u64 = 42;

impl FloatExt for f64 {
  fn from_usize_(n: usize) -> Self {
    n as f64
  }

  fn from_f64_(v: f64) -> Self {
    v
  }

  fn normal_array<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    mean: Self,
    std_dev: Self,
  ) -> Result<Array1<Self>> {
    let dist = Normal::new(mean, std_dev).map_err(|_| SynthError::NonPositiveSigma(std_dev))?;
    Ok(Array1::random_using(n, dist, rng))
  }
}

impl FloatExt for f32 {
  fn from_usize_(n: usize) -> Self {
    n as f32
  }

  fn from_f64_(v: f64) -> Self {
    v as f32
  }

  fn normal_array<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    mean: Self,
    std_dev: Self,
  ) -> Result<Array1<Self>> {
    let dist =
      Normal::new(mean, std_dev).map_err(|_| SynthError::NonPositiveSigma(std_dev as f64))?;
    Ok(Array1::random_using(n, dist, rng))
  }
}

pub(crate) fn validate_sigma<T: FloatExt>(sigma: T) -> Result<()> {
  if sigma.is_finite() && sigma > T::zero() {
    Ok(())
  } else {
    Err(SynthError::NonPositiveSigma(
      sigma.to_f64().unwrap_or(f64::NAN),
    ))
  }
}

pub(crate) fn ensure_finite<T: FloatExt>(value: T, name: &'static str) -> Result<()> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(SynthError::NonFiniteParameter(name))
  }
}

pub(crate) fn ensure_length(n: usize, prefix: usize) -> Result<()> {
  if n > prefix {
    Ok(())
  } else {
    Err(SynthError::InvalidLength { n, prefix })
  }
}

pub(crate) fn ensure_draws<T>(draws: &Array1<T>, expected: usize) -> Result<()> {
  if draws.len() == expected {
    Ok(())
  } else {
    Err(SynthError::NoiseLengthMismatch {
      expected,
      actual: draws.len(),
    })
  }
}
