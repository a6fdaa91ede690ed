//! Spectral analysis utilities (periodogram and peak search).

use std::f64::consts::PI;

use ndarray::Array1;
use ndrustfft::FftHandler;
use ndrustfft::ndfft;
use num_complex::Complex64;

use super::common::mean;
use super::common::validate_series;
use crate::error::Result;
use crate::error::SynthError;

/// Detrending strategy used before spectral estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetrendMethod {
  /// No detrending.
  None,
  /// Remove sample mean.
  Mean,
  /// Remove best-fit linear trend.
  Linear,
}

/// Periodic window applied before the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFunction {
  /// w[i] = 1
  Rectangular,
  /// w[i] = 0.5 - 0.5 cos(2πi/N)
  Hann,
  /// w[i] = 0.54 - 0.46 cos(2πi/N)
  Hamming,
}

/// Spectrum scaling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumScaling {
  /// Power spectrum, `|X|^2 / (sum w)^2`.
  Power,
  /// Power spectral density, `|X|^2 / (fs sum w^2)`.
  Density,
}

/// Configuration for periodogram estimation.
#[derive(Debug, Clone, Copy)]
pub struct PeriodogramConfig {
  /// Sampling frequency (samples per unit time).
  pub sampling_rate: f64,
  /// FFT size. `None` uses the series length; a larger size zero-pads and a
  /// smaller one truncates the series.
  pub nfft: Option<usize>,
  pub detrend: DetrendMethod,
  pub window: WindowFunction,
  /// Whether to return one-sided spectrum (for real signals).
  pub onesided: bool,
  pub scaling: SpectrumScaling,
}

impl Default for PeriodogramConfig {
  fn default() -> Self {
    Self {
      sampling_rate: 1.0,
      nfft: None,
      detrend: DetrendMethod::Mean,
      window: WindowFunction::Rectangular,
      onesided: true,
      scaling: SpectrumScaling::Density,
    }
  }
}

/// Periodogram output.
#[derive(Debug, Clone)]
pub struct PeriodogramResult {
  /// Frequency bins `k * fs / nfft`.
  pub frequencies: Vec<f64>,
  /// Spectrum values at `frequencies`.
  pub spectrum: Vec<f64>,
  pub resolution: f64,
  pub nfft: usize,
  pub sample_size: usize,
}

impl PeriodogramResult {
  /// `1 / mean(frequencies)` over every returned bin, DC included.
  pub fn mean_period(&self) -> Result<f64> {
    mean_period(&self.frequencies)
  }
}

/// Single spectral peak.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumPeak {
  /// Bin index in the periodogram output.
  pub index: usize,
  pub frequency: f64,
  /// `1 / frequency`, if the frequency is positive.
  pub period: Option<f64>,
  pub power: f64,
}

impl SpectrumPeak {
  fn at(pg: &PeriodogramResult, index: usize) -> Self {
    let frequency = pg.frequencies[index];
    Self {
      index,
      frequency,
      period: (frequency > 0.0).then(|| 1.0 / frequency),
      power: pg.spectrum[index],
    }
  }
}

fn detrend_in_place(data: &mut [f64], method: DetrendMethod) {
  match method {
    DetrendMethod::None => {}
    DetrendMethod::Mean => {
      let m = mean(data);
      for x in data {
        *x -= m;
      }
    }
    DetrendMethod::Linear => {
      let n_f = data.len() as f64;
      let mean_x = (n_f - 1.0) * 0.5;
      let mean_y = mean(data);

      let mut num = 0.0;
      let mut den = 0.0;
      for (i, &y) in data.iter().enumerate() {
        let x = i as f64;
        num += (x - mean_x) * (y - mean_y);
        den += (x - mean_x) * (x - mean_x);
      }
      let slope = if den > 0.0 { num / den } else { 0.0 };
      let intercept = mean_y - slope * mean_x;

      for (i, y) in data.iter_mut().enumerate() {
        *y -= intercept + slope * i as f64;
      }
    }
  }
}

fn window_coeff(window: WindowFunction, i: usize, n: usize) -> f64 {
  let a = 2.0 * PI * i as f64 / n as f64;
  match window {
    WindowFunction::Rectangular => 1.0,
    WindowFunction::Hann => 0.5 - 0.5 * a.cos(),
    WindowFunction::Hamming => 0.54 - 0.46 * a.cos(),
  }
}

/// Periodogram of a real series through a single FFT.
///
/// Bins are scaled so that, with density scaling, `sum(spectrum) * resolution`
/// equals the variance of the detrended, windowed series.
pub fn periodogram(signal: &[f64], cfg: PeriodogramConfig) -> Result<PeriodogramResult> {
  validate_series(signal, 2)?;
  if !(cfg.sampling_rate > 0.0 && cfg.sampling_rate.is_finite()) {
    return Err(SynthError::NonFiniteParameter("sampling_rate"));
  }

  // a shorter FFT keeps only the first `nfft` samples
  let nfft = cfg.nfft.unwrap_or(signal.len());
  if nfft < 2 {
    return Err(SynthError::InsufficientData { n: nfft, min: 2 });
  }
  let signal = &signal[..nfft.min(signal.len())];
  let n = signal.len();

  let mut x = signal.to_vec();
  detrend_in_place(&mut x, cfg.detrend);

  let mut sum_w = 0.0;
  let mut sum_w2 = 0.0;
  let mut input = Array1::<Complex64>::zeros(nfft);
  for (i, v) in x.iter().enumerate() {
    let w = window_coeff(cfg.window, i, n);
    sum_w += w;
    sum_w2 += w * w;
    input[i] = Complex64::new(v * w, 0.0);
  }

  let mut fft_out = Array1::<Complex64>::zeros(nfft);
  let fft = FftHandler::<f64>::new(nfft);
  ndfft(&input, &mut fft_out, &fft, 0);

  let scale = match cfg.scaling {
    SpectrumScaling::Density => 1.0 / (cfg.sampling_rate * sum_w2),
    SpectrumScaling::Power => 1.0 / (sum_w * sum_w),
  };

  let resolution = cfg.sampling_rate / nfft as f64;
  let bins = if cfg.onesided { nfft / 2 + 1 } else { nfft };

  let mut frequencies = Vec::with_capacity(bins);
  let mut spectrum = Vec::with_capacity(bins);
  for k in 0..bins {
    let mut p = fft_out[k].norm_sqr() * scale;
    if cfg.onesided && k > 0 && !(nfft % 2 == 0 && k == nfft / 2) {
      p *= 2.0;
    }
    frequencies.push(k as f64 * resolution);
    spectrum.push(p);
  }

  Ok(PeriodogramResult {
    frequencies,
    spectrum,
    resolution,
    nfft,
    sample_size: n,
  })
}

/// Local maxima of the spectrum sorted by descending power, at most `top_k`.
///
/// Peaks closer than `min_separation_bins` to a stronger peak are skipped.
pub fn spectral_peaks(
  pg: &PeriodogramResult,
  top_k: usize,
  min_separation_bins: usize,
  exclude_dc: bool,
) -> Vec<SpectrumPeak> {
  let n = pg.spectrum.len();
  let start = usize::from(exclude_dc);

  let mut candidates = (start..n)
    .filter(|&i| {
      let p = pg.spectrum[i];
      let left = if i > 0 { pg.spectrum[i - 1] } else { f64::NEG_INFINITY };
      let right = pg.spectrum.get(i + 1).copied().unwrap_or(f64::NEG_INFINITY);
      p >= left && p >= right
    })
    .collect::<Vec<_>>();
  candidates.sort_by(|a, b| pg.spectrum[*b].total_cmp(&pg.spectrum[*a]));

  let min_sep = min_separation_bins.max(1);
  let mut peaks: Vec<SpectrumPeak> = Vec::with_capacity(top_k);
  for idx in candidates {
    if peaks.len() >= top_k {
      break;
    }
    if peaks.iter().all(|peak| peak.index.abs_diff(idx) >= min_sep) {
      peaks.push(SpectrumPeak::at(pg, idx));
    }
  }

  peaks
}

/// Strongest non-DC bin.
pub fn dominant_frequency(pg: &PeriodogramResult) -> Option<SpectrumPeak> {
  (1..pg.spectrum.len())
    .max_by(|a, b| pg.spectrum[*a].total_cmp(&pg.spectrum[*b]))
    .map(|i| SpectrumPeak::at(pg, i))
}

/// `1 / mean(frequencies)`.
pub fn mean_period(frequencies: &[f64]) -> Result<f64> {
  validate_series(frequencies, 1)?;
  let m = mean(frequencies);
  if m == 0.0 {
    return Err(SynthError::ConstantSeries);
  }
  Ok(1.0 / m)
}
