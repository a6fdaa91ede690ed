//! # AR(p) estimation
//!
//! $$
//! x_t = c + \sum_{k=1}^{p}\phi_k x_{t-k} + \varepsilon_t,\qquad
//! \varepsilon_t\sim\mathcal N(0,\sigma^2)
//! $$
//!
//! Conditional least squares on `t = p..n`, i.e. the Gaussian likelihood
//! conditioned on the first `p` observations.
use std::f64::consts::PI;
use std::f64::consts::SQRT_2;
use std::fmt;

use nalgebra::DMatrix;
use ndarray::Array1;
use prettytable::Table;
use prettytable::row;
use statrs::function::erf::erfc;
use tracing::info;
use tracing::warn;

use super::common::ols;
use super::common::validate_series;
use crate::error::Result;
use crate::error::SynthError;

#[derive(Debug, Clone)]
pub struct ArFit {
  pub order: usize,
  pub intercept: f64,
  pub phi: Array1<f64>,
  /// Standard errors, intercept first.
  pub std_err: Array1<f64>,
  /// Innovation variance estimate `sse / nobs`.
  pub sigma2: f64,
  pub loglik: f64,
  pub aic: f64,
  pub bic: f64,
  pub nobs: usize,
  pub residuals: Array1<f64>,
  history: Vec<f64>,
}

impl ArFit {
  pub fn fit(y: &[f64], order: usize) -> Result<Self> {
    if order == 0 {
      return Err(SynthError::EmptyCoefficients);
    }
    validate_series(y, 2 * order + 2)?;

    let n = y.len();
    let mut lhs = Vec::with_capacity(n - order);
    let mut rhs = Vec::with_capacity(n - order);
    for t in order..n {
      lhs.push(y[t]);
      let mut row = Vec::with_capacity(order + 1);
      row.push(1.0);
      for k in 1..=order {
        row.push(y[t - k]);
      }
      rhs.push(row);
    }

    let fit = ols(&lhs, &rhs)?;
    let nobs = fit.nobs as f64;
    let sigma2 = fit.sse / nobs;
    if sigma2 <= 0.0 {
      return Err(SynthError::ConstantSeries);
    }

    let loglik = -0.5 * nobs * ((2.0 * PI * sigma2).ln() + 1.0);
    // intercept, phi and sigma2
    let k = (fit.k + 1) as f64;
    let out = Self {
      order,
      intercept: fit.beta[0],
      phi: Array1::from_vec(fit.beta[1..].to_vec()),
      std_err: Array1::from_vec(fit.std_err),
      sigma2,
      loglik,
      aic: -2.0 * loglik + 2.0 * k,
      bic: -2.0 * loglik + k * nobs.ln(),
      nobs: fit.nobs,
      residuals: Array1::from_vec(fit.residuals),
      history: y[n - order..].to_vec(),
    };

    info!(order, nobs = out.nobs, aic = out.aic, "fitted AR model");
    if !out.is_stationary() {
      warn!(
        phi = ?out.phi.to_vec(),
        "fitted AR polynomial has a root on or inside the unit circle"
      );
    }

    Ok(out)
  }

  /// Unconditional mean `c / (1 - sum phi)`.
  pub fn mean(&self) -> f64 {
    self.intercept / (1.0 - self.phi.sum())
  }

  /// Largest eigenvalue modulus of the companion matrix.
  pub fn spectral_radius(&self) -> f64 {
    let p = self.order;
    let mut companion = DMatrix::<f64>::zeros(p, p);
    for k in 0..p {
      companion[(0, k)] = self.phi[k];
    }
    for i in 1..p {
      companion[(i, i - 1)] = 1.0;
    }
    companion
      .complex_eigenvalues()
      .iter()
      .map(|z| z.norm())
      .fold(0.0, f64::max)
  }

  /// Companion roots strictly inside the unit circle, up to `1e-8`.
  pub fn is_stationary(&self) -> bool {
    self.spectral_radius() < 1.0 - 1e-8
  }

  /// z statistics, intercept first.
  pub fn z_values(&self) -> Array1<f64> {
    let coefs = std::iter::once(self.intercept).chain(self.phi.iter().copied());
    Array1::from_iter(
      coefs
        .zip(self.std_err.iter())
        .map(|(b, se)| if *se > 0.0 { b / se } else { f64::NAN }),
    )
  }

  /// Two-sided normal p-values for [`z_values`](Self::z_values).
  pub fn p_values(&self) -> Array1<f64> {
    self.z_values().mapv(|z| erfc(z.abs() / SQRT_2))
  }

  /// Recursive `h`-step forecast from the last `order` observations.
  pub fn forecast(&self, h: usize) -> Array1<f64> {
    let mut path = self.history.clone();
    path.reserve(h);
    for _ in 0..h {
      let t = path.len();
      let mut val = self.intercept;
      for k in 1..=self.order {
        val += self.phi[k - 1] * path[t - k];
      }
      path.push(val);
    }
    Array1::from_vec(path.split_off(self.order))
  }

  pub fn summary_table(&self) -> Table {
    let z = self.z_values();
    let pv = self.p_values();
    let mut table = Table::new();
    table.add_row(row!["", "coef", "std err", "z", "P>|z|"]);
    table.add_row(row![
      "intercept",
      format!("{:.4}", self.intercept),
      format!("{:.4}", self.std_err[0]),
      format!("{:.3}", z[0]),
      format!("{:.3}", pv[0])
    ]);
    for k in 0..self.order {
      table.add_row(row![
        format!("ar.L{}", k + 1),
        format!("{:.4}", self.phi[k]),
        format!("{:.4}", self.std_err[k + 1]),
        format!("{:.3}", z[k + 1]),
        format!("{:.3}", pv[k + 1])
      ]);
    }
    table.add_row(row!["mean", format!("{:.4}", self.mean()), "", "", ""]);
    table.add_row(row!["sigma2", format!("{:.4}", self.sigma2), "", "", ""]);
    table
  }
}

impl fmt::Display for ArFit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "AR({}) conditional least squares", self.order)?;
    writeln!(
      f,
      "No. Observations: {}  Log Likelihood: {:.3}  AIC: {:.3}  BIC: {:.3}",
      self.nobs, self.loglik, self.aic, self.bic
    )?;
    write!(f, "{}", self.summary_table())
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use tracing_test::traced_test;

  use super::*;
  use crate::stochastic::autoregressive::generate_ar;
  use crate::stochastic::autoregressive::generate_ar1;

  #[test]
  fn recovers_ar2_coefficients() {
    let y = generate_ar(5000, &[0.5, 0.3], 1.0, 7).unwrap().to_vec();
    let fit = ArFit::fit(&y, 2).unwrap();
    assert_eq!(fit.nobs, 4998);
    assert!((fit.phi[0] - 0.5).abs() < 0.05, "phi = {:?}", fit.phi);
    assert!((fit.phi[1] - 0.3).abs() < 0.05, "phi = {:?}", fit.phi);
    assert!(fit.intercept.abs() < 0.1);
    assert!((fit.sigma2 - 1.0).abs() < 0.1);
    assert!(fit.is_stationary());
  }

  #[test]
  fn noiseless_recurrence_is_exact() {
    let mut y = vec![1.0, 2.0];
    for t in 2..30 {
      let v = 0.5 + 0.4 * y[t - 1] - 0.3 * y[t - 2];
      y.push(v);
    }
    // residuals vanish, so jitter one point to keep sigma2 positive
    y[29] += 1e-3;
    let fit = ArFit::fit(&y, 2).unwrap();
    assert_abs_diff_eq!(fit.intercept, 0.5, epsilon = 1e-3);
    assert_abs_diff_eq!(fit.phi[0], 0.4, epsilon = 1e-3);
    assert_abs_diff_eq!(fit.phi[1], -0.3, epsilon = 1e-3);
  }

  #[test]
  fn forecast_follows_fitted_recurrence_and_reverts_to_mean() {
    let y = generate_ar1(2000, 0.6, 1.0, 42).unwrap().to_vec();
    let fit = ArFit::fit(&y, 1).unwrap();
    let fc = fit.forecast(200);
    assert_eq!(fc.len(), 200);
    assert_abs_diff_eq!(
      fc[0],
      fit.intercept + fit.phi[0] * y[1999],
      epsilon = 1e-12
    );
    assert_abs_diff_eq!(fc[199], fit.mean(), epsilon = 1e-9);
  }

  #[test]
  fn information_criteria_are_consistent() {
    let y = generate_ar1(300, 0.6, 1.0, 42).unwrap().to_vec();
    let fit = ArFit::fit(&y, 1).unwrap();
    assert_abs_diff_eq!(fit.aic, -2.0 * fit.loglik + 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.bic, -2.0 * fit.loglik + 3.0 * 299f64.ln(), epsilon = 1e-9);
    assert!(fit.p_values()[1] < 1e-6);
  }

  #[test]
  fn unit_root_is_not_stationary() {
    let fit = ArFit {
      order: 2,
      intercept: 0.0,
      phi: ndarray::arr1(&[0.5, 0.5]),
      std_err: ndarray::arr1(&[1.0, 1.0, 1.0]),
      sigma2: 1.0,
      loglik: 0.0,
      aic: 0.0,
      bic: 0.0,
      nobs: 10,
      residuals: Array1::zeros(10),
      history: vec![0.0, 0.0],
    };
    assert_abs_diff_eq!(fit.spectral_radius(), 1.0, epsilon = 1e-12);
    assert!(!fit.is_stationary());
  }

  #[test]
  fn summary_reports_process_mean_apart_from_intercept() {
    let fit = ArFit {
      order: 1,
      intercept: 0.3,
      phi: ndarray::arr1(&[0.4]),
      std_err: ndarray::arr1(&[0.1, 0.1]),
      sigma2: 1.0,
      loglik: 0.0,
      aic: 0.0,
      bic: 0.0,
      nobs: 10,
      residuals: Array1::zeros(10),
      history: vec![0.0],
    };
    assert_abs_diff_eq!(fit.mean(), 0.5, epsilon = 1e-12);
    let text = fit.summary_table().to_string();
    let mean_row = text.lines().find(|l| l.contains("mean")).unwrap();
    assert!(mean_row.contains("0.5000"));
    let intercept_row = text.lines().find(|l| l.contains("intercept")).unwrap();
    assert!(intercept_row.contains("0.3000"));
  }

  #[test]
  fn summary_lists_every_coefficient() {
    let y = generate_ar(107, &[-0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.8], 1.0, 42)
      .unwrap()
      .to_vec();
    let text = ArFit::fit(&y[7..], 7).unwrap().to_string();
    assert!(text.contains("AR(7)"));
    assert!(text.contains("intercept"));
    assert!(!text.contains("const"));
    assert!(text.contains("ar.L7"));
    assert!(text.contains("sigma2"));
  }

  #[test]
  #[traced_test]
  fn fitting_is_logged() {
    let y = generate_ar1(200, 0.6, 1.0, 42).unwrap().to_vec();
    ArFit::fit(&y, 1).unwrap();
    assert!(logs_contain("fitted AR model"));
  }

  #[test]
  fn order_zero_and_short_input_are_rejected() {
    assert!(matches!(
      ArFit::fit(&[1.0, 2.0, 3.0], 0),
      Err(SynthError::EmptyCoefficients)
    ));
    assert!(matches!(
      ArFit::fit(&[1.0, 2.0, 3.0], 2),
      Err(SynthError::InsufficientData { .. })
    ));
  }
}
