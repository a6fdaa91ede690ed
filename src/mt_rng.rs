//! # Mt Rng
//!
//! $$
//! x_{k+n}=x_{k+m}\oplus\big((x_k^{u}\mid x_{k+1}^{l})A\big),\quad y=\mathrm{temper}(x)
//! $$
//!
//! 32-bit Mersenne Twister (MT19937) seeded with `init_genrand`. It exists so
//! that a seed maps onto the same uniform stream as the classic reference
//! implementation, which is what the reference Gaussian noise is built on.
use std::fmt;

use rand::RngCore;
use rand::SeedableRng;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

#[derive(Clone)]
pub struct Mt19937 {
  state: [u32; N],
  index: usize,
}

impl Mt19937 {
  pub fn new(seed: u32) -> Self {
    let mut state = [0u32; N];
    state[0] = seed;
    for i in 1..N {
      let prev = state[i - 1];
      state[i] = 1_812_433_253u32
        .wrapping_mul(prev ^ (prev >> 30))
        .wrapping_add(i as u32);
    }
    Self { state, index: N }
  }

  fn twist(&mut self) {
    for i in 0..N {
      let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
      let mut next = self.state[(i + M) % N] ^ (y >> 1);
      if y & 1 != 0 {
        next ^= MATRIX_A;
      }
      self.state[i] = next;
    }
    self.index = 0;
  }

  #[inline]
  fn next_tempered(&mut self) -> u32 {
    if self.index >= N {
      self.twist();
    }
    let mut y = self.state[self.index];
    self.index += 1;

    y ^= y >> 11;
    y ^= (y << 7) & 0x9d2c_5680;
    y ^= (y << 15) & 0xefc6_0000;
    y ^ (y >> 18)
  }

  /// Uniform on `[0, 1)` with 53 bits of resolution built from two draws.
  pub fn next_f64(&mut self) -> f64 {
    let a = self.next_tempered() >> 5;
    let b = self.next_tempered() >> 6;
    (a as f64 * 67_108_864.0 + b as f64) / 9_007_199_254_740_992.0
  }
}

impl Default for Mt19937 {
  fn default() -> Self {
    Self::new(5489)
  }
}

impl fmt::Debug for Mt19937 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Mt19937")
      .field("index", &self.index)
      .finish_non_exhaustive()
  }
}

impl RngCore for Mt19937 {
  #[inline]
  fn next_u32(&mut self) -> u32 {
    self.next_tempered()
  }

  #[inline]
  fn next_u64(&mut self) -> u64 {
    let lo = self.next_tempered() as u64;
    let hi = self.next_tempered() as u64;
    (hi << 32) | lo
  }

  fn fill_bytes(&mut self, dest: &mut [u8]) {
    let mut chunks = dest.chunks_exact_mut(4);
    for chunk in &mut chunks {
      chunk.copy_from_slice(&self.next_tempered().to_le_bytes());
    }
    let rem = chunks.into_remainder();
    if !rem.is_empty() {
      let bytes = self.next_tempered().to_le_bytes();
      rem.copy_from_slice(&bytes[..rem.len()]);
    }
  }

  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
    self.fill_bytes(dest);
    Ok(())
  }
}

impl SeedableRng for Mt19937 {
  type Seed = [u8; 4];

  fn from_seed(seed: Self::Seed) -> Self {
    Self::new(u32::from_le_bytes(seed))
  }
}
