//! # Autoregressive
//!
//! $$
//! X_t = f(X_{t-1}, X_{t-2}, \ldots, \varepsilon_t, \varepsilon_{t-1}, \ldots)
//! $$
//!
//! The free functions below are thin `f64` wrappers around the struct forms.
//! They sample with the default [`PolarGaussian`](crate::stochastic::noise::polar::PolarGaussian)
//! stream, so the same arguments always return the same series.
pub mod ar;
pub mod arma;
pub mod ma;

use ndarray::Array1;

use crate::error::Result;
use crate::stochastic::coefficients::Coefficients;
use crate::stochastic::overlay::SeasonalTrend;
use crate::stochastic::ProcessExt;

use self::ar::ARp;
use self::arma::ARMA1;
use self::ma::MA1;

/// AR(p) series of length `n` with coefficients `phi[0..p]` on lags `1..=p`.
pub fn generate_ar(n: usize, phi: &[f64], sigma: f64, seed: u64) -> Result<Array1<f64>> {
  ARp::new(Coefficients::from_slice(phi)?, sigma, n, seed)?.sample()
}

pub fn generate_ar1(n: usize, phi: f64, sigma: f64, seed: u64) -> Result<Array1<f64>> {
  generate_ar(n, &[phi], sigma, seed)
}

pub fn generate_ma1(n: usize, phi: f64, theta: f64, sigma: f64, seed: u64) -> Result<Array1<f64>> {
  MA1::new(phi, theta, sigma, n, seed)?.sample()
}

#[allow(clippy::too_many_arguments)]
pub fn generate_ma1_seasonal_trend(
  n: usize,
  phi: f64,
  theta: f64,
  sigma: f64,
  seed: u64,
  freq: f64,
  trend_slope: f64,
) -> Result<Array1<f64>> {
  let overlay = SeasonalTrend::new(freq, trend_slope)?;
  MA1::new(phi, theta, sigma, n, seed)?
    .with_overlay(overlay)
    .sample()
}

/// ARMA(1)-like series; `phi` is `[intercept, ar1]`. See [`ARMA1`] for the
/// exact recursion.
#[allow(clippy::too_many_arguments)]
pub fn generate_arma1_seasonal_trend(
  n: usize,
  phi: &[f64],
  theta: f64,
  sigma: f64,
  seed: u64,
  freq: f64,
  trend_slope: f64,
) -> Result<Array1<f64>> {
  let overlay = SeasonalTrend::new(freq, trend_slope)?;
  ARMA1::new(Coefficients::new(Array1::from_vec(phi.to_vec()), 2)?, theta, sigma, n, seed)?
    .with_overlay(overlay)
    .sample()
}
