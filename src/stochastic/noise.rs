//! # Noise
//!
//! $$
//! \varepsilon_t \overset{\text{iid}}{\sim} \mathcal{N}(\mu, \sigma^2),\quad t = 0,\dots,n-1
//! $$
//!
//! | Source              | Backing generator                          | Seeds            |
//! |---------------------|--------------------------------------------|------------------|
//! | [`polar::PolarGaussian`] | MT19937 + Marsaglia polar method      | `0..=u32::MAX`   |
//! | [`wn::Wn`]          | `StdRng` + `rand_distr::Normal`            | any `u64`        |
//! | [`fixed::FixedNoise`] | caller-supplied sequence, replayed       | ignored          |
pub mod fixed;
pub mod polar;
pub mod wn;
