use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

use crate::error::Result;
use crate::stochastic::validate_sigma;
use crate::stochastic::FloatExt;
use crate::stochastic::NoiseSource;
use crate::stochastic::SEED;

/// White noise drawn from `rand_distr::Normal` over a seeded `StdRng`.
///
/// Reproducible for a fixed seed within one build of `rand`; it makes no
/// promise of matching any other implementation's stream.
#[derive(Clone, Debug)]
pub struct Wn {
  rng: StdRng,
}

impl Wn {
  pub fn new(seed: u64) -> Self {
    Wn {
      rng: StdRng::seed_from_u64(seed),
    }
  }
}

impl Default for Wn {
  fn default() -> Self {
    Self::new(SEED)
  }
}

impl<T: FloatExt> NoiseSource<T> for Wn {
  fn reseed(&mut self, seed: u64) -> Result<()> {
    trace!(seed, "reseeding StdRng white noise");
    self.rng = StdRng::seed_from_u64(seed);
    Ok(())
  }

  fn draw_normal(&mut self, mean: T, std_dev: T, count: usize) -> Result<Array1<T>> {
    validate_sigma(std_dev)?;
    T::normal_array(&mut self.rng, count, mean, std_dev)
  }
}
