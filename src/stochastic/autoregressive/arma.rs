use ndarray::Array1;
use tracing::debug;

use crate::error::Result;
use crate::error::SynthError;
use crate::stochastic::coefficients::Coefficients;
use crate::stochastic::ensure_draws;
use crate::stochastic::ensure_finite;
use crate::stochastic::ensure_length;
use crate::stochastic::overlay::SeasonalTrend;
use crate::stochastic::validate_sigma;
use crate::stochastic::FloatExt;
use crate::stochastic::NoiseSource;
use crate::stochastic::ProcessExt;

/// Implements the ARMA(1)-like recursion
///
/// \[
///   r_t = \phi_0 + \phi_1 r_{t-1} + \phi_0 (1 - \theta) + a_t - \theta a_{t-1},
///   \quad t = 1, \dots, n-1,
/// \]
///
/// with `r_0 = 0` and an optional [`SeasonalTrend`] added to every index
/// afterwards.
///
/// This is not the textbook ARMA(1,1) parameterisation: `phi[0]` appears both
/// as an intercept and as the scale of the MA-style constant
/// `phi[0] * (1 - theta)`. The formula is kept exactly as written so that
/// generated series match the reference data; do not "simplify" it.
///
/// # Fields
/// - `phi`: order-2 coefficients, `[intercept, ar1]`.
/// - `theta`: MA(1) coefficient on \(a_{t-1}\).
/// - `sigma`: Standard deviation of \(a_t\).
/// - `n`: Length of the time series.
/// - `seed`: Seed applied to the noise source before every draw.
#[derive(Clone, Debug)]
pub struct ARMA1<T: FloatExt> {
  phi: Coefficients<T>,
  pub theta: T,
  sigma: T,
  n: usize,
  seed: u64,
  overlay: Option<SeasonalTrend<T>>,
}

impl<T: FloatExt> ARMA1<T> {
  /// `phi` must have order 2.
  pub fn new(phi: Coefficients<T>, theta: T, sigma: T, n: usize, seed: u64) -> Result<Self> {
    if phi.order() != 2 {
      return Err(SynthError::OrderMismatch {
        expected: 2,
        actual: phi.order(),
      });
    }
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

  pub fn phi(&self) -> &Coefficients<T> {
    &self.phi
  }

  pub fn n(&self) -> usize {
    self.n
  }
}

impl<T: FloatExt> ProcessExt<T> for ARMA1<T> {
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
      "sampling ARMA(1)-like"
    );

    noise.reseed(seed)?;
    let a = noise.draw_normal(T::zero(), self.sigma, self.n)?;
    ensure_draws(&a, self.n)?;

    let c = self.phi.lag(1);
    let ar = self.phi.lag(2);
    let mut series = Array1::<T>::zeros(self.n);
    for t in 1..self.n {
      series[t] =
        c + ar * series[t - 1] + c * (T::one() - self.theta) + a[t] - self.theta * a[t - 1];
    }

    if let Some(overlay) = &self.overlay {
      overlay.apply(&mut series);
    }

    Ok(series)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::arr1;

  use super::ARMA1;
  use crate::error::SynthError;
  use crate::stochastic::coefficients::Coefficients;
  use crate::stochastic::noise::fixed::FixedNoise;
  use crate::stochastic::overlay::SeasonalTrend;
  use crate::stochastic::ProcessExt;

  #[test]
  fn intercept_is_used_twice() {
    // Zero noise isolates the deterministic part: r_t = 0.3 + 0.4 r_{t-1} + 0.3 * 0.4.
    let phi = Coefficients::from_slice(&[0.3, 0.4]).unwrap();
    let arma = ARMA1::new(phi, 0.6, 1.0, 4, 0).unwrap();
    let r = arma
      .sample_with(&mut FixedNoise::new(arr1(&[0.0, 0.0, 0.0, 0.0])))
      .unwrap();

    let c = 0.3 + 0.3 * (1.0 - 0.6);
    assert_eq!(r[0], 0.0);
    assert_abs_diff_eq!(r[1], c, epsilon = 1e-15);
    assert_abs_diff_eq!(r[2], c + 0.4 * r[1], epsilon = 1e-15);
    assert_abs_diff_eq!(r[3], c + 0.4 * r[2], epsilon = 1e-15);
  }

  #[test]
  fn follows_recurrence_on_fixed_noise() {
    let a = [1.0, -0.5, 2.0];
    let phi = Coefficients::from_slice(&[0.3, 0.4]).unwrap();
    let r = ARMA1::new(phi, 0.6, 1.0, 3, 0)
      .unwrap()
      .sample_with(&mut FixedNoise::new(arr1(&a)))
      .unwrap();

    let r1 = 0.3 + 0.4 * 0.0 + 0.3 * 0.4 + a[1] - 0.6 * a[0];
    let r2 = 0.3 + 0.4 * r1 + 0.3 * 0.4 + a[2] - 0.6 * a[1];
    assert_abs_diff_eq!(r[1], r1, epsilon = 1e-12);
    assert_abs_diff_eq!(r[2], r2, epsilon = 1e-12);
  }

  #[test]
  fn overlay_is_added_after_the_recurrence() {
    let phi = Coefficients::from_slice(&[0.3, 0.4]).unwrap();
    let base = ARMA1::new(phi, 0.6, 1.0, 60, 43).unwrap();
    let overlay = SeasonalTrend::weekly(0.1).unwrap();
    let plain = base.sample().unwrap();
    let seasonal = base.with_overlay(overlay).sample().unwrap();
    for t in 0..60 {
      assert_abs_diff_eq!(seasonal[t] - plain[t], overlay.addend(t), epsilon = 1e-12);
    }
  }

  #[test]
  fn phi_must_have_two_entries() {
    let phi = Coefficients::from_slice(&[0.3]).unwrap();
    let err = ARMA1::new(phi, 0.6, 1.0, 10, 43).unwrap_err();
    assert!(matches!(
      err,
      SynthError::OrderMismatch {
        expected: 2,
        actual: 1
      }
    ));
  }
}
