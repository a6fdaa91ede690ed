use ndarray::Array1;
use tracing::debug;

use crate::error::Result;
use crate::stochastic::ensure_draws;
use crate::stochastic::ensure_finite;
use crate::stochastic::ensure_length;
use crate::stochastic::overlay::SeasonalTrend;
use crate::stochastic::validate_sigma;
use crate::stochastic::FloatExt;
use crate::stochastic::NoiseSource;
use crate::stochastic::ProcessExt;

/// Implements an MA(1) model with a constant offset:
///
/// \[
///   r_t = \phi\,(1 - \theta) + a_t - \theta\, a_{t-1},
///   \quad a_t \sim \mathcal{N}(0, \sigma^2),
///   \quad t = 1, \dots, n-1,
/// \]
///
/// with `r_0 = 0`. An optional [`SeasonalTrend`] is added to every index
/// after the recurrence, including index 0.
///
/// # Fields
/// - `phi`: scale of the constant term \(\phi(1-\theta)\).
/// - `theta`: MA(1) coefficient.
/// - `sigma`: Standard deviation of \(a_t\).
/// - `n`: Length of the time series.
/// - `seed`: Seed applied to the noise source before every draw.
#[derive(Clone, Debug)]
pub struct MA1<T: FloatExt> {
  pub phi: T,
  pub theta: T,
  sigma: T,
  n: usize,
  seed: u64,
  overlay: Option<SeasonalTrend<T>>,
}

impl<T: FloatExt> MA1<T> {
  pub fn new(phi: T, theta: T, sigma: T, n: usize, seed: u64) -> Result<Self> {
    ensure_finite(phi, "phi")?;
    ensure_finite(theta, "theta")?;
    validate_sigma(sigma)?;
    ensure_length(n, 1)?;
    Ok(Self {
      phi,
      theta,
      sigma,
      n,
      seed,
      overlay: None,
    })
  }

  pub fn with_overlay(mut self, overlay: SeasonalTrend<T>) -> Self {
    self.overlay = Some(overlay);
    self
  }

  pub fn overlay(&self) -> Option<&SeasonalTrend<T>> {
    self.overlay.as_ref()
  }

  pub fn n(&self) -> usize {
    self.n
  }
}

impl<T: FloatExt> ProcessExt<T> for MA1<T> {
  type Output = Array1<T>;

  fn seed(&self) -> u64 {
    self.seed
  }

  fn sample_seeded<N>(&self, seed: u64, noise: &mut N) -> Result<Self::Output>
  where
    N: NoiseSource<T> + ?Sized,
  {
    debug!(
      n = self.n,
      seed,
      overlay = self.overlay.is_some(),
      "sampling MA(1)"
    );

    noise.reseed(seed)?;
    let a = noise.draw_normal(T::zero(), self.sigma, self.n)?;
    ensure_draws(&a, self.n)?;

    let offset = self.phi * (T::one() - self.theta);
    let mut series = Array1::<T>::zeros(self.n);
    for t in 1..self.n {
      series[t] = offset + a[t] - self.theta * a[t - 1];
    }

    if let Some(overlay) = &self.overlay {
      overlay.apply(&mut series);
    }

    Ok(series)
  }
}
