//! # Seasonal decomposition
//!
//! $$
//! x_t = T_t + S_t + R_t
//! $$
//!
//! Classical additive decomposition. The trend is a centred moving average
//! of length `period` (a `2 x period` average for even periods) and is NaN
//! within `period / 2` steps of either end. The seasonal component is the
//! per-phase mean of the detrended series, shifted to zero mean and tiled.
use ndarray::Array1;
use tracing::debug;

use super::common::validate_series;
use crate::error::Result;
use crate::error::SynthError;

#[derive(Debug, Clone)]
pub struct Decomposition {
  pub observed: Array1<f64>,
  pub trend: Array1<f64>,
  pub seasonal: Array1<f64>,
  pub resid: Array1<f64>,
  pub period: usize,
}

impl Decomposition {
  /// One cycle of the seasonal component, phases `0..period`.
  pub fn seasonal_profile(&self) -> Array1<f64> {
    self.seasonal.slice(ndarray::s![..self.period]).to_owned()
  }
}

fn trend_filter(period: usize) -> Vec<f64> {
  let p = period as f64;
  if period % 2 == 0 {
    let mut filt = vec![1.0 / p; period + 1];
    filt[0] = 0.5 / p;
    filt[period] = 0.5 / p;
    filt
  } else {
    vec![1.0 / p; period]
  }
}

fn centred_moving_average(y: &[f64], filt: &[f64]) -> Array1<f64> {
  let n = y.len();
  let half = filt.len() / 2;
  Array1::from_shape_fn(n, |t| {
    if t < half || t + half >= n {
      return f64::NAN;
    }
    filt
      .iter()
      .enumerate()
      .map(|(j, w)| w * y[t + j - half])
      .sum()
  })
}

pub fn seasonal_decompose(y: &[f64], period: usize) -> Result<Decomposition> {
  if period < 2 {
    return Err(SynthError::InvalidPeriod(period));
  }
  validate_series(y, 2 * period)?;
  debug!(n = y.len(), period, "seasonal decomposition");

  let n = y.len();
  let observed = Array1::from_vec(y.to_vec());
  let trend = centred_moving_average(y, &trend_filter(period));
  let detrended = &observed - &trend;

  let mut profile = (0..period)
    .map(|phase| {
      let vals = detrended
        .iter()
        .skip(phase)
        .step_by(period)
        .filter(|v| !v.is_nan())
        .collect::<Vec<_>>();
      vals.iter().copied().sum::<f64>() / vals.len() as f64
    })
    .collect::<Vec<_>>();
  let centre = profile.iter().sum::<f64>() / period as f64;
  for v in &mut profile {
    *v -= centre;
  }

  let seasonal = Array1::from_shape_fn(n, |t| profile[t % period]);
  let resid = &detrended - &seasonal;

  Ok(Decomposition {
    observed,
    trend,
    seasonal,
    resid,
    period,
  })
}
