//! # Coefficients
//!
//! $$
//! \boldsymbol\phi = (\phi_1,\dots,\phi_p),\quad p = \texttt{order}
//! $$
//!
use ndarray::Array1;

use crate::error::Result;
use crate::error::SynthError;
use crate::stochastic::FloatExt;

/// Ordered lag coefficients with an explicit process order.
///
/// `values[k - 1]` weights lag `k`. Construction checks that the number of
/// values equals `order`, so a misplaced or missing coefficient is caught
/// before any sampling happens.
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficients<T: FloatExt> {
  values: Array1<T>,
  order: usize,
}

impl<T: FloatExt> Coefficients<T> {
  pub fn new(values: Array1<T>, order: usize) -> Result<Self> {
    if order == 0 {
      return Err(SynthError::EmptyCoefficients);
    }
    if values.len() != order {
      return Err(SynthError::OrderMismatch {
        expected: order,
        actual: values.len(),
      });
    }
    if values.iter().any(|v| !v.is_finite()) {
      return Err(SynthError::NonFiniteParameter("phi"));
    }
    Ok(Self { values, order })
  }

  /// Order inferred from the slice length.
  pub fn from_slice(values: &[T]) -> Result<Self> {
    Self::new(Array1::from_vec(values.to_vec()), values.len())
  }

  pub fn order(&self) -> usize {
    self.order
  }

  pub fn values(&self) -> &Array1<T> {
    &self.values
  }

  /// Coefficient on lag `k`, 1-based.
  ///
  /// # Panics
  /// Panics if `k == 0` or `k > order`.
  pub fn lag(&self, k: usize) -> T {
    assert!(k >= 1 && k <= self.order, "lag {k} outside 1..={}", self.order);
    self.values[k - 1]
  }
}
