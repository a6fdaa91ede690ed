use ndarray::Array1;

use crate::error::Result;
use crate::stochastic::ensure_draws;
use crate::stochastic::FloatExt;
use crate::stochastic::NoiseSource;

/// Replays a fixed standard sequence, mapped through `mean + std_dev * z`.
///
/// Lets callers pin the innovations exactly, e.g. to check a recurrence
/// against a hand-computed expectation. The last seed passed to `reseed`
/// is recorded.
#[derive(Clone, Debug)]
pub struct FixedNoise<T: FloatExt> {
  values: Array1<T>,
  last_seed: Option<u64>,
}

impl<T: FloatExt> FixedNoise<T> {
  pub fn new(values: Array1<T>) -> Self {
    Self {
      values,
      last_seed: None,
    }
  }

  pub fn last_seed(&self) -> Option<u64> {
    self.last_seed
  }
}

impl<T: FloatExt> NoiseSource<T> for FixedNoise<T> {
  fn reseed(&mut self, seed: u64) -> Result<()> {
    self.last_seed = Some(seed);
    Ok(())
  }

  fn draw_normal(&mut self, mean: T, std_dev: T, count: usize) -> Result<Array1<T>> {
    let out = self.values.mapv(|z| mean + std_dev * z);
    ensure_draws(&out, count)?;
    Ok(out)
  }
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;

  use super::FixedNoise;
  use crate::error::SynthError;
  use crate::stochastic::NoiseSource;

  #[test]
  fn replays_scaled_values() {
    let mut noise = FixedNoise::new(arr1(&[1.0, -1.0, 0.5]));
    let x = noise.draw_normal(1.0, 2.0, 3).unwrap();
    assert_eq!(x, arr1(&[3.0, -1.0, 2.0]));
  }

  #[test]
  fn records_seed() {
    let mut noise = FixedNoise::new(arr1(&[0.0f64]));
    noise.reseed(17).unwrap();
    assert_eq!(noise.last_seed(), Some(17));
  }

  #[test]
  fn wrong_count_is_an_error() {
    let mut noise = FixedNoise::new(arr1(&[0.0f64, 1.0]));
    let err = noise.draw_normal(0.0, 1.0, 3).unwrap_err();
    assert!(matches!(
      err,
      SynthError::NoiseLengthMismatch {
        expected: 3,
        actual: 2
      }
    ));
  }
}
