//! # synthetic-ts
//!
//! $$
//! X_t = \sum_{k=1}^{p}\phi_k X_{t-k} + \varepsilon_t,\qquad
//! r_t = c + a_t - \theta a_{t-1} + \cos(2\pi f t) + \beta t
//! $$
//!
//! Seeded AR(p), MA(1) and ARMA(1)-like generators with optional seasonality
//! and trend, single-column CSV export, and the diagnostics used to inspect
//! the results: ACF/PACF, periodogram, seasonal decomposition and AR(p)
//! fitting with forecasts.
//!
//! Generators are pure functions of their parameters. Every draw reseeds the
//! noise source, so the same parameters always produce the same series.

pub mod error;
pub mod io;
pub mod mt_rng;
pub mod scenarios;
pub mod stats;
pub mod stochastic;
pub mod traits;
pub mod visualization;

pub use error::Result;
pub use error::SynthError;
