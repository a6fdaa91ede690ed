//! # Traits
//!
//! $$
//! \text{Trait contracts: }(\text{parameters},\ \text{seed},\ \varepsilon)\mapsto X_{0:n-1}
//! $$
//!
use std::fmt::Debug;
use std::fmt::Display;
use std::iter::Sum;
use std::ops::AddAssign;
use std::ops::SubAssign;

use ndarray::Array1;
use ndarray::ScalarOperand;
use rand::Rng;
use rayon::prelude::*;

use crate::error::Result;
use crate::stochastic::noise::polar::PolarGaussian;

pub trait FloatExt:
  num_traits::Float
  + num_traits::FromPrimitive
  + num_traits::FloatConst
  + Sum
  + Default
  + Debug
  + Display
  + Send
  + Sync
  + ScalarOperand
  + AddAssign
  + SubAssign
  + 'static
{
  fn from_usize_(n: usize) -> Self;
  fn from_f64_(v: f64) -> Self;
  fn normal_array<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    mean: Self,
    std_dev: Self,
  ) -> Result<Array1<Self>>;
}

/// Seedable source of i.i.d. Gaussian draws.
///
/// Implementations own their random state. Generators call [`reseed`](NoiseSource::reseed)
/// immediately before every draw, so the same seed and count always yield the same sequence.
pub trait NoiseSource<T: FloatExt> {
  fn reseed(&mut self, seed: u64) -> Result<()>;

  fn draw_normal(&mut self, mean: T, std_dev: T, count: usize) -> Result<Array1<T>>;
}

pub trait ProcessExt<T: FloatExt>: Send + Sync {
  type Output: Send;

  /// Seed the process was configured with.
  fn seed(&self) -> u64;

  /// Reseed `noise` with `seed` and run the recurrence once.
  fn sample_seeded<N>(&self, seed: u64, noise: &mut N) -> Result<Self::Output>
  where
    N: NoiseSource<T> + ?Sized;

  fn sample_with<N>(&self, noise: &mut N) -> Result<Self::Output>
  where
    N: NoiseSource<T> + ?Sized,
  {
    self.sample_seeded(self.seed(), noise)
  }

  /// Sample with the reference MT19937 polar-Gaussian stream.
  fn sample(&self) -> Result<Self::Output> {
    self.sample_with(&mut PolarGaussian::default())
  }

  /// One independent path per seed, generated in parallel.
  ///
  /// Each path owns its noise source, so `sample_par(&[s])[0] == sample_seeded(s, ..)`.
  fn sample_par(&self, seeds: &[u64]) -> Result<Vec<Self::Output>> {
    seeds
      .par_iter()
      .map(|&seed| self.sample_seeded(seed, &mut PolarGaussian::default()))
      .collect()
  }
}
