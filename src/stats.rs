//! # Stats
//!
//! $$
//! \hat\rho_k=\frac{\sum_{t=k}^{n-1}(x_t-\bar x)(x_{t-k}-\bar x)}{\sum_{t=0}^{n-1}(x_t-\bar x)^2}
//! $$
//!
//! Diagnostics for generated series: correlograms, spectra, seasonal
//! decomposition and AR(p) estimation.
mod common;

pub mod acf;
pub mod ar_fit;
pub mod decompose;
pub mod spectral;
