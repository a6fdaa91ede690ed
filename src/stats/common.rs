use nalgebra::DMatrix;
use nalgebra::DVector;

use crate::error::Result;
use crate::error::SynthError;

#[derive(Debug, Clone)]
pub struct OlsResult {
  pub beta: Vec<f64>,
  pub std_err: Vec<f64>,
  pub residuals: Vec<f64>,
  pub sse: f64,
  pub nobs: usize,
  pub k: usize,
}

pub fn validate_series(y: &[f64], min_n: usize) -> Result<()> {
  if y.len() < min_n {
    return Err(SynthError::InsufficientData {
      n: y.len(),
      min: min_n,
    });
  }
  if y.iter().any(|v| !v.is_finite()) {
    return Err(SynthError::NonFiniteData);
  }
  Ok(())
}

pub fn mean(y: &[f64]) -> f64 {
  y.iter().sum::<f64>() / y.len() as f64
}

/// Ordinary least squares through the normal equations.
///
/// `x` holds one row per observation. Rows are assumed rectangular.
pub fn ols(y: &[f64], x: &[Vec<f64>]) -> Result<OlsResult> {
  let n = y.len();
  let k = x.first().map_or(0, Vec::len);
  if k == 0 || x.len() != n || n <= k {
    return Err(SynthError::InsufficientData { n, min: k + 1 });
  }

  let flat_x = x.iter().flatten().copied().collect::<Vec<_>>();
  let x_mat = DMatrix::from_row_slice(n, k, &flat_x);
  let y_vec = DVector::from_row_slice(y);

  let xtx = x_mat.transpose() * &x_mat;
  let xtx_inv = xtx.try_inverse().ok_or(SynthError::SingularDesign)?;

  let beta = &xtx_inv * x_mat.transpose() * &y_vec;
  let residuals_vec = y_vec - &x_mat * &beta;

  let residuals = residuals_vec.iter().copied().collect::<Vec<_>>();
  let sse = residuals.iter().map(|u| u * u).sum::<f64>();
  let sigma2 = (sse / (n - k) as f64).max(0.0);

  let cov = xtx_inv * sigma2;
  let std_err = (0..k).map(|i| cov[(i, i)].max(0.0).sqrt()).collect();

  Ok(OlsResult {
    beta: beta.iter().copied().collect(),
    std_err,
    residuals,
    sse,
    nobs: n,
    k,
  })
}
