//! # Overlay
//!
//! $$
//! Y_t = X_t + \cos(2\pi f t) + \beta t
//! $$
//!
use ndarray::Array1;

use crate::error::Result;
use crate::stochastic::ensure_finite;
use crate::stochastic::FloatExt;

/// Cosine seasonality with frequency `frequency` (cycles per step) plus a
/// linear trend with slope `trend_slope`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeasonalTrend<T: FloatExt> {
  pub frequency: T,
  pub trend_slope: T,
}

impl<T: FloatExt> SeasonalTrend<T> {
  pub fn new(frequency: T, trend_slope: T) -> Result<Self> {
    ensure_finite(frequency, "frequency")?;
    ensure_finite(trend_slope, "trend_slope")?;
    Ok(Self {
      frequency,
      trend_slope,
    })
  }

  /// Weekly cycle on daily steps.
  pub fn weekly(trend_slope: T) -> Result<Self> {
    Self::new(T::one() / T::from_usize_(7), trend_slope)
  }

  /// Value added at time index `t`.
  pub fn addend(&self, t: usize) -> T {
    let t = T::from_usize_(t);
    let omega = T::from_f64_(2.0) * T::PI() * self.frequency;
    (omega * t).cos() + self.trend_slope * t
  }

  /// Add the overlay to every index, including the zero prefix.
  pub fn apply(&self, series: &mut Array1<T>) {
    for (t, x) in series.iter_mut().enumerate() {
      *x += self.addend(t);
    }
  }

  pub fn as_array(&self, n: usize) -> Array1<T> {
    Array1::from_shape_fn(n, |t| self.addend(t))
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::Array1;

  use super::SeasonalTrend;
  use crate::error::SynthError;

  #[test]
  fn addend_at_zero_is_one() {
    let overlay = SeasonalTrend::new(1.0 / 7.0, 0.1).unwrap();
    assert_abs_diff_eq!(overlay.addend(0), 1.0);
  }

  #[test]
  fn period_seven_repeats_up_to_trend() {
    let overlay = SeasonalTrend::weekly(0.1).unwrap();
    let n = 30;
    let y = overlay.as_array(n);
    for t in 0..n - 7 {
      assert_abs_diff_eq!(y[t + 7] - y[t], 0.7, epsilon = 1e-9);
    }
  }

  #[test]
  fn apply_touches_every_index() {
    let overlay = SeasonalTrend::new(0.25, 2.0).unwrap();
    let mut x = Array1::<f64>::zeros(4);
    overlay.apply(&mut x);
    let expected = [1.0, 2.0, 3.0, 6.0];
    for (got, want) in x.iter().zip(expected) {
      assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }
  }

  #[test]
  fn non_finite_frequency_rejected() {
    let err = SeasonalTrend::new(f64::INFINITY, 0.0).unwrap_err();
    assert!(matches!(err, SynthError::NonFiniteParameter("frequency")));
  }
}
