//! Sample autocorrelation, partial autocorrelation and white-noise bands.

use std::f64::consts::SQRT_2;

use ndarray::Array1;
use statrs::function::erf::erf_inv;

use super::common::mean;
use super::common::validate_series;
use crate::error::Result;
use crate::error::SynthError;

/// Autocovariance normalisation used by the PACF recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacfMethod {
  /// Divide every lag by `n` (Yule-Walker, MLE autocovariances).
  #[default]
  YuleWalkerMle,
  /// Divide lag `k` by `n - k`.
  YuleWalkerAdjusted,
}

fn autocovariances(y: &[f64], nlags: usize, adjusted: bool) -> Vec<f64> {
  let n = y.len();
  let m = mean(y);
  (0..=nlags)
    .map(|k| {
      let s = (k..n).map(|t| (y[t] - m) * (y[t - k] - m)).sum::<f64>();
      if adjusted {
        s / (n - k) as f64
      } else {
        s / n as f64
      }
    })
    .collect()
}

fn correlations(y: &[f64], nlags: usize, adjusted: bool) -> Result<Vec<f64>> {
  validate_series(y, 2)?;
  let nlags = nlags.min(y.len() - 1);
  let acov = autocovariances(y, nlags, adjusted);
  if acov[0] <= 0.0 {
    return Err(SynthError::ConstantSeries);
  }
  Ok(acov.iter().map(|c| c / acov[0]).collect())
}

/// Biased sample ACF for lags `0..=nlags`, `nlags` clamped to `n - 1`.
pub fn acf(y: &[f64], nlags: usize) -> Result<Array1<f64>> {
  Ok(Array1::from_vec(correlations(y, nlags, false)?))
}

/// Sample PACF for lags `0..=nlags` via the Durbin-Levinson recursion.
pub fn pacf(y: &[f64], nlags: usize) -> Result<Array1<f64>> {
  pacf_with(y, nlags, PacfMethod::default())
}

pub fn pacf_with(y: &[f64], nlags: usize, method: PacfMethod) -> Result<Array1<f64>> {
  let rho = correlations(y, nlags, matches!(method, PacfMethod::YuleWalkerAdjusted))?;
  Ok(Array1::from_vec(durbin_levinson(&rho)))
}

/// Partial autocorrelations from autocorrelations `rho[0..=K]`.
fn durbin_levinson(rho: &[f64]) -> Vec<f64> {
  let nlags = rho.len() - 1;
  let mut out = vec![1.0; nlags + 1];
  let mut phi = vec![0.0; nlags + 1];
  let mut prev = vec![0.0; nlags + 1];

  for k in 1..=nlags {
    let mut num = rho[k];
    let mut den = 1.0;
    for j in 1..k {
      num -= prev[j] * rho[k - j];
      den -= prev[j] * rho[j];
    }
    let phi_kk = if den.abs() > f64::EPSILON { num / den } else { 0.0 };
    phi[k] = phi_kk;
    for j in 1..k {
      phi[j] = prev[j] - phi_kk * prev[k - j];
    }
    out[k] = phi_kk;
    prev[..=k].copy_from_slice(&phi[..=k]);
  }

  out
}

fn two_sided_quantile(alpha: f64) -> Result<f64> {
  if !(alpha > 0.0 && alpha < 1.0) {
    return Err(SynthError::InvalidAlpha(alpha));
  }
  Ok(SQRT_2 * erf_inv(1.0 - alpha))
}

/// Half-width of the white-noise band `z_{1-alpha/2} / sqrt(n)`.
pub fn confidence_band(n: usize, alpha: f64) -> Result<f64> {
  if n == 0 {
    return Err(SynthError::InsufficientData { n, min: 1 });
  }
  Ok(two_sided_quantile(alpha)? / (n as f64).sqrt())
}

/// Lag-dependent ACF band from Bartlett's formula.
///
/// Entry `k` is `z * sqrt((1 + 2 sum_{j<k} rho_j^2) / n)`; entry 0 is zero.
pub fn bartlett_band(rho: &Array1<f64>, n: usize, alpha: f64) -> Result<Array1<f64>> {
  let half = confidence_band(n, alpha)?;
  let mut cum = 0.0_f64;
  let mut band = Array1::zeros(rho.len());
  for k in 1..rho.len() {
    band[k] = half * (1.0 + 2.0 * cum).sqrt();
    cum += rho[k] * rho[k];
  }
  Ok(band)
}
