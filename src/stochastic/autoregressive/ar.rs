use ndarray::Array1;
use tracing::debug;

use crate::error::Result;
use crate::stochastic::coefficients::Coefficients;
use crate::stochastic::ensure_draws;
use crate::stochastic::ensure_length;
use crate::stochastic::validate_sigma;
use crate::stochastic::FloatExt;
use crate::stochastic::NoiseSource;
use crate::stochastic::ProcessExt;

/// Implements an AR(p) model:
///
/// \[
///   X_t = \phi_1 X_{t-1} + \phi_2 X_{t-2} + \dots + \phi_p X_{t-p}
///         + \epsilon_t,
///   \quad \epsilon_t \sim \mathcal{N}(0, \sigma^2),
///   \quad t = p, \dots, n-1.
/// \]
///
/// `X_0, ..., X_{p-1}` are held at zero and never touched by the recurrence.
/// There is no warm-up, so the first values after the prefix are not drawn
/// from the stationary distribution.
///
/// # Fields
/// - `phi`: AR coefficients (\(\phi_1, \ldots, \phi_p\)).
/// - `sigma`: Standard deviation of the noise \(\epsilon_t\).
/// - `n`: Length of the time series.
/// - `seed`: Seed applied to the noise source before every draw.
#[derive(Clone, Debug)]
pub struct ARp<T: FloatExt> {
  phi: Coefficients<T>,
  sigma: T,
  n: usize,
  seed: u64,
}

impl<T: FloatExt> ARp<T> {
  /// Create a new AR process, checking `n > p` and `sigma > 0`.
  pub fn new(phi: Coefficients<T>, sigma: T, n: usize, seed: u64) -> Result<Self> {
    validate_sigma(sigma)?;
    ensure_length(n, phi.order())?;
    Ok(Self {
      phi,
      sigma,
      n,
      seed,
    })
  }

  pub fn phi(&self) -> &Coefficients<T> {
    &self.phi
  }

  pub fn sigma(&self) -> T {
    self.sigma
  }

  pub fn n(&self) -> usize {
    self.n
  }

  /// Length of the zero prefix.
  pub fn burn_in(&self) -> usize {
    self.phi.order()
  }
}

impl<T: FloatExt> ProcessExt<T> for ARp<T> {
  type Output = Array1<T>;

  fn seed(&self) -> u64 {
    self.seed
  }

  fn sample_seeded<N>(&self, seed: u64, noise: &mut N) -> Result<Self::Output>
  where
    N: NoiseSource<T> + ?Sized,
  {
    let p = self.phi.order();
    debug!(order = p, n = self.n, seed, "sampling AR(p)");

    noise.reseed(seed)?;
    let eps = noise.draw_normal(T::zero(), self.sigma, self.n)?;
    ensure_draws(&eps, self.n)?;

    let mut series = Array1::<T>::zeros(self.n);
    for t in p..self.n {
      let mut val = T::zero();
      for k in 1..=p {
        val += self.phi.lag(k) * series[t - k];
      }
      series[t] = val + eps[t];
    }

    Ok(series)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::arr1;

  use super::ARp;
  use crate::error::SynthError;
  use crate::stochastic::coefficients::Coefficients;
  use crate::stochastic::noise::fixed::FixedNoise;
  use crate::stochastic::noise::wn::Wn;
  use crate::stochastic::ProcessExt;

  #[test]
  fn ar1_follows_recurrence_on_fixed_noise() {
    let e = [0.3, -1.2, 0.7, 2.0, -0.4];
    let mut noise = FixedNoise::new(arr1(&e));
    let ar = ARp::new(Coefficients::from_slice(&[0.6]).unwrap(), 1.0, 5, 0).unwrap();
    let x = ar.sample_with(&mut noise).unwrap();

    let x1 = 0.6 * 0.0 + e[1];
    let x2 = 0.6 * x1 + e[2];
    let x3 = 0.6 * x2 + e[3];
    let x4 = 0.6 * x3 + e[4];
    let expected = [0.0, x1, x2, x3, x4];
    for (got, want) in x.iter().zip(expected) {
      assert_abs_diff_eq!(*got, want, epsilon = 1e-15);
    }
  }

  #[test]
  fn ar3_uses_lags_in_order() {
    let e = [9.0, 9.0, 9.0, 1.0, 1.0, 1.0];
    let mut noise = FixedNoise::new(arr1(&e));
    let phi = Coefficients::from_slice(&[0.5, 0.25, 0.125]).unwrap();
    let x = ARp::new(phi, 1.0, 6, 0)
      .unwrap()
      .sample_with(&mut noise)
      .unwrap();

    assert_eq!(&x.to_vec()[..3], &[0.0, 0.0, 0.0]);
    assert_abs_diff_eq!(x[3], 1.0);
    assert_abs_diff_eq!(x[4], 0.5 * 1.0 + 1.0);
    assert_abs_diff_eq!(x[5], 0.5 * 1.5 + 0.25 * 1.0 + 1.0);
  }

  #[test]
  fn sigma_scales_the_innovations() {
    let mut noise = FixedNoise::new(arr1(&[0.0, 1.0, 1.0]));
    let ar = ARp::new(Coefficients::from_slice(&[0.0]).unwrap(), 2.5, 3, 0).unwrap();
    let x = ar.sample_with(&mut noise).unwrap();
    assert_eq!(x, arr1(&[0.0, 2.5, 2.5]));
  }

  #[test]
  fn generator_reseeds_with_its_own_seed() {
    let mut noise = FixedNoise::new(arr1(&[0.0, 0.0, 0.0]));
    let ar = ARp::new(Coefficients::from_slice(&[0.1]).unwrap(), 1.0, 3, 1234).unwrap();
    ar.sample_with(&mut noise).unwrap();
    assert_eq!(noise.last_seed(), Some(1234));
  }

  #[test]
  fn n_must_exceed_order() {
    let phi = Coefficients::from_slice(&[0.5, -0.3, 0.2, -0.1, 0.05]).unwrap();
    let err = ARp::new(phi, 1.0, 5, 42).unwrap_err();
    assert!(matches!(err, SynthError::InvalidLength { n: 5, prefix: 5 }));
  }

  #[test]
  fn sigma_must_be_positive() {
    let phi = Coefficients::from_slice(&[0.5]).unwrap();
    assert!(matches!(
      ARp::new(phi.clone(), 0.0, 10, 42).unwrap_err(),
      SynthError::NonPositiveSigma(_)
    ));
    assert!(matches!(
      ARp::new(phi, f64::NAN, 10, 42).unwrap_err(),
      SynthError::NonPositiveSigma(_)
    ));
  }

  #[test]
  fn std_rng_noise_is_deterministic_too() {
    let ar = ARp::new(Coefficients::from_slice(&[0.4, 0.2]).unwrap(), 1.0, 256, 99).unwrap();
    let a = ar.sample_with(&mut Wn::default()).unwrap();
    let b = ar.sample_with(&mut Wn::new(12345)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a[0], 0.0);
    assert_eq!(a[1], 0.0);
  }

  #[test]
  fn f32_paths_are_supported() {
    let phi = Coefficients::from_slice(&[0.6f32]).unwrap();
    let x = ARp::new(phi, 1.0f32, 50, 42).unwrap().sample().unwrap();
    assert_eq!(x.len(), 50);
    assert_eq!(x[0], 0.0f32);
    assert!(x.iter().all(|v| v.is_finite()));
  }
}
