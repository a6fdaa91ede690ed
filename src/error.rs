//! # Error
//!
//! $$
//! \text{precondition violated} \Rightarrow \texttt{Err}(\text{SynthError})
//! $$
//!
//! Every fallible operation in the crate returns [`Result`]. Generators
//! validate their parameters at construction time, so a successfully built
//! process always samples a full-length series.

/// Error type for generation, diagnostics and tabular I/O.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
  /// The requested length does not leave room for the recurrence after the burn-in prefix.
  #[error("series length n={n} must exceed the burn-in prefix of {prefix}")]
  InvalidLength {
    /// Requested series length.
    n: usize,
    /// Number of leading indices held at zero.
    prefix: usize,
  },

  /// A coefficient vector was built with order zero.
  #[error("coefficient vector is empty")]
  EmptyCoefficients,

  /// The number of coefficients does not match the declared process order.
  #[error("coefficient vector has {actual} entries, expected order {expected}")]
  OrderMismatch {
    /// Declared order.
    expected: usize,
    /// Number of values supplied.
    actual: usize,
  },

  /// The noise standard deviation is zero, negative or not finite.
  #[error("noise scale sigma must be positive and finite, got {0}")]
  NonPositiveSigma(f64),

  /// A named parameter is NaN or infinite.
  #[error("parameter `{0}` must be finite")]
  NonFiniteParameter(&'static str),

  /// The seed cannot be represented by the noise source.
  #[error("seed {0} does not fit the 32-bit Mersenne Twister state")]
  SeedOutOfRange(u64),

  /// A noise source returned a different number of draws than requested.
  #[error("noise source returned {actual} draws, expected {expected}")]
  NoiseLengthMismatch {
    /// Requested draw count.
    expected: usize,
    /// Draws actually produced.
    actual: usize,
  },

  /// The input series is too short for the requested statistic.
  #[error("insufficient data: got {n} observations, need at least {min}")]
  InsufficientData {
    /// Observations provided.
    n: usize,
    /// Minimum required.
    min: usize,
  },

  /// The input series has zero variance.
  #[error("series is constant (zero variance)")]
  ConstantSeries,

  /// The input series contains NaN or infinite values.
  #[error("series contains non-finite values")]
  NonFiniteData,

  /// Seasonal period below two.
  #[error("seasonal period must be at least 2, got {0}")]
  InvalidPeriod(usize),

  /// Significance level outside of (0, 1).
  #[error("significance level must lie in (0, 1), got {0}")]
  InvalidAlpha(f64),

  /// The least-squares normal equations could not be inverted.
  #[error("least-squares design matrix is singular")]
  SingularDesign,

  /// A column label that cannot be written as a single CSV header cell and
  /// read back unchanged.
  #[error("invalid column label {0:?}")]
  InvalidLabel(String),

  /// Malformed tabular input.
  #[error("csv line {line}: {reason}")]
  Csv {
    /// 1-based line number.
    line: usize,
    /// What went wrong.
    reason: String,
  },

  /// Underlying file or stream failure.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SynthError>;
