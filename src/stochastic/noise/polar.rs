use ndarray::Array1;
use tracing::trace;

use crate::error::Result;
use crate::error::SynthError;
use crate::mt_rng::Mt19937;
use crate::stochastic::validate_sigma;
use crate::stochastic::FloatExt;
use crate::stochastic::NoiseSource;
use crate::stochastic::SEED;

/// Gaussian noise from the Marsaglia polar method over MT19937.
///
/// Each accepted pair `(x1, x2)` yields two deviates; `f * x2` is returned
/// first and `f * x1` is cached for the next call. Uniforms come from
/// [`Mt19937::next_f64`]. Together with `init_genrand` seeding this is the
/// legacy MT19937 Gaussian stream, so seed 42 starts with
/// `0.4967141530112327, -0.13826430117118466, ...`.
///
/// Reseeding discards the cached deviate.
#[derive(Clone, Debug)]
pub struct PolarGaussian {
  rng: Mt19937,
  cached: Option<f64>,
}

impl PolarGaussian {
  pub fn new(seed: u64) -> Result<Self> {
    let seed = u32::try_from(seed).map_err(|_| SynthError::SeedOutOfRange(seed))?;
    Ok(Self {
      rng: Mt19937::new(seed),
      cached: None,
    })
  }

  /// Next standard normal deviate.
  pub fn next_standard(&mut self) -> f64 {
    if let Some(g) = self.cached.take() {
      return g;
    }

    loop {
      let x1 = 2.0 * self.rng.next_f64() - 1.0;
      let x2 = 2.0 * self.rng.next_f64() - 1.0;
      let r2 = x1 * x1 + x2 * x2;
      if r2 < 1.0 && r2 != 0.0 {
        let f = (-2.0 * r2.ln() / r2).sqrt();
        self.cached = Some(f * x1);
        return f * x2;
      }
    }
  }
}

impl Default for PolarGaussian {
  fn default() -> Self {
    Self {
      rng: Mt19937::new(SEED as u32),
      cached: None,
    }
  }
}

impl<T: FloatExt> NoiseSource<T> for PolarGaussian {
  fn reseed(&mut self, seed: u64) -> Result<()> {
    trace!(seed, "reseeding MT19937 polar noise");
    *self = Self::new(seed)?;
    Ok(())
  }

  fn draw_normal(&mut self, mean: T, std_dev: T, count: usize) -> Result<Array1<T>> {
    validate_sigma(std_dev)?;
    Ok(Array1::from_shape_fn(count, |_| {
      mean + std_dev * T::from_f64_(self.next_standard())
    }))
  }
}
