//! # Scenarios
//!
//! $$
//! \theta_{\text{scenario}} = (n, \boldsymbol\phi, \theta, \sigma, \text{seed}, f, \beta)
//! $$
//!
//! Typed parameter sets for the two lecture workflows. `Default` yields the
//! values the reference datasets were generated with.
use impl_new_derive::ImplNew;
use ndarray::Array1;

use crate::error::Result;
use crate::stochastic::autoregressive::generate_ar;
use crate::stochastic::autoregressive::generate_arma1_seasonal_trend;
use crate::stochastic::autoregressive::generate_ma1;
use crate::stochastic::autoregressive::generate_ma1_seasonal_trend;
use crate::stochastic::SEED;
use crate::stochastic::SIGMA;

/// Directory the binary writes CSV and HTML output to.
pub const OUTPUT_DIR: &str = "output";

/// AR(p) dataset exported without its zero prefix.
#[derive(ImplNew, Clone, Debug, PartialEq)]
pub struct ArScenario {
  pub label: String,
  pub n: usize,
  pub phi: Vec<f64>,
  pub sigma: f64,
  pub seed: u64,
}

impl ArScenario {
  /// AR(1), `phi = 0.6`, `n = 101`.
  pub fn dataset1() -> Self {
    Self::new("dataset1".into(), 101, vec![0.6], SIGMA, SEED)
  }

  /// AR(5), `n = 105`.
  pub fn dataset2() -> Self {
    Self::new(
      "dataset2".into(),
      105,
      vec![0.5, -0.3, 0.2, -0.1, 0.05],
      SIGMA,
      SEED,
    )
  }

  /// AR(7) driven by lags 1 and 7 only, `n = 107`.
  pub fn dataset3() -> Self {
    Self::new(
      "dataset3".into(),
      107,
      vec![-0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.8],
      SIGMA,
      SEED,
    )
  }

  pub fn order(&self) -> usize {
    self.phi.len()
  }

  pub fn generate(&self) -> Result<Array1<f64>> {
    generate_ar(self.n, &self.phi, self.sigma, self.seed)
  }
}

#[derive(ImplNew, Clone, Copy, Debug, PartialEq)]
pub struct Ma1Scenario {
  pub n: usize,
  pub phi: f64,
  pub theta: f64,
  pub sigma: f64,
  pub seed: u64,
  pub frequency: f64,
  pub trend_slope: f64,
}

impl Default for Ma1Scenario {
  fn default() -> Self {
    Self::new(100, 0.6, 0.6, SIGMA, 43, 1.0 / 7.0, 0.1)
  }
}

impl Ma1Scenario {
  pub fn generate(&self) -> Result<Array1<f64>> {
    generate_ma1(self.n, self.phi, self.theta, self.sigma, self.seed)
  }

  pub fn generate_seasonal_trend(&self) -> Result<Array1<f64>> {
    generate_ma1_seasonal_trend(
      self.n,
      self.phi,
      self.theta,
      self.sigma,
      self.seed,
      self.frequency,
      self.trend_slope,
    )
  }
}

#[derive(ImplNew, Clone, Copy, Debug, PartialEq)]
pub struct Arma1Scenario {
  pub n: usize,
  /// `[intercept, ar1]`
  pub phi: [f64; 2],
  pub theta: f64,
  pub sigma: f64,
  pub seed: u64,
  pub frequency: f64,
  pub trend_slope: f64,
}

impl Default for Arma1Scenario {
  fn default() -> Self {
    Self::new(100, [0.3, 0.4], 0.6, SIGMA, 43, 1.0 / 7.0, 0.1)
  }
}

impl Arma1Scenario {
  pub fn generate(&self) -> Result<Array1<f64>> {
    generate_arma1_seasonal_trend(
      self.n,
      &self.phi,
      self.theta,
      self.sigma,
      self.seed,
      self.frequency,
      self.trend_slope,
    )
  }
}

/// Settings shared by the diagnostic steps.
#[derive(ImplNew, Clone, Copy, Debug, PartialEq)]
pub struct DiagnosticsConfig {
  pub nlags: usize,
  pub alpha: f64,
  pub period: usize,
  pub ar_order: usize,
  pub horizon: usize,
}

impl Default for DiagnosticsConfig {
  fn default() -> Self {
    Self::new(20, 0.05, 20, 7, 7)
  }
}
