//! # Visualization
//!
//! $$
//! \{x_t\},\ \hat\rho_k,\ \hat\phi_{kk},\ I(f),\ (T_t,S_t,R_t) \mapsto \text{charts on a shared grid}
//! $$
//!
//! Builders return a [`Plot`]; writing it out (`write_html`) is up to the caller.
use plotly::Bar;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;
use plotly::common::Anchor;
use plotly::common::DashType;
use plotly::common::Font;
use plotly::common::Line;
use plotly::common::Mode;
use plotly::layout::Annotation;
use plotly::layout::GridPattern;
use plotly::layout::LayoutGrid;
use plotly::layout::Margin;

use crate::stats::decompose::Decomposition;
use crate::stats::spectral::PeriodogramResult;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TraceKind {
  Line,
  Bars,
}

struct GridSeries {
  label: String,
  kind: TraceKind,
  values: Vec<f64>,
}

struct GridEntry {
  title: String,
  x: Vec<f64>,
  series: Vec<GridSeries>,
  band: Option<Vec<f64>>,
}

/// Stacks panels on a plotly grid, one panel per registered entry.
pub struct GridPlotter {
  entries: Vec<GridEntry>,
  cols: usize,
  line_width: f64,
  show_legend: bool,
  title: String,
}

impl Default for GridPlotter {
  fn default() -> Self {
    Self::new()
  }
}

impl GridPlotter {
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      cols: 1,
      line_width: 1.2,
      show_legend: false,
      title: String::new(),
    }
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }

  pub fn cols(mut self, n: usize) -> Self {
    self.cols = n.max(1);
    self
  }

  pub fn line_width(mut self, w: f64) -> Self {
    self.line_width = w;
    self
  }

  pub fn show_legend(mut self, show: bool) -> Self {
    self.show_legend = show;
    self
  }

  /// Line panel over the time index `0..n`.
  pub fn register_series(self, values: &[f64], title: &str) -> Self {
    let x = (0..values.len()).map(|t| t as f64).collect();
    self.register_line(x, values, title)
  }

  /// Line panel over an explicit x grid.
  pub fn register_line(mut self, x: Vec<f64>, values: &[f64], title: &str) -> Self {
    self.entries.push(GridEntry {
      title: title.into(),
      x,
      series: vec![GridSeries {
        label: title.into(),
        kind: TraceKind::Line,
        values: values.to_vec(),
      }],
      band: None,
    });
    self
  }

  /// Stem-style panel for lags `0..values.len()` with an optional per-lag
  /// `±band[k]` envelope.
  pub fn register_correlogram(mut self, values: &[f64], title: &str, band: Option<&[f64]>) -> Self {
    self.entries.push(GridEntry {
      title: title.into(),
      x: (0..values.len()).map(|k| k as f64).collect(),
      series: vec![GridSeries {
        label: title.into(),
        kind: TraceKind::Bars,
        values: values.to_vec(),
      }],
      band: band.map(<[f64]>::to_vec),
    });
    self
  }

  pub fn plot(self) -> Plot {
    let n = self.entries.len();
    let cols = self.cols;
    let rows = n.div_ceil(cols).max(1);
    let plot_height = (rows * 320 + 160).max(480);
    let x_gap = if cols > 1 { 0.06 / cols as f64 } else { 0.0 };
    let y_gap = if rows > 1 { 0.3 / rows as f64 } else { 0.0 };

    let axis_name = |subplot_idx: usize, axis: &str| -> String {
      if subplot_idx == 1 {
        axis.to_string()
      } else {
        format!("{axis}{subplot_idx}")
      }
    };

    let annotations = self
      .entries
      .iter()
      .enumerate()
      .map(|(idx, entry)| {
        let xa = axis_name(idx + 1, "x");
        let ya = axis_name(idx + 1, "y");
        Annotation::new()
          .text(format!("<b>{}</b>", entry.title))
          .x_ref(format!("{xa} domain"))
          .y_ref(format!("{ya} domain"))
          .x(0.5)
          .y(1.08)
          .x_anchor(Anchor::Center)
          .y_anchor(Anchor::Top)
          .font(Font::new().size(12))
          .show_arrow(false)
      })
      .collect::<Vec<_>>();

    let mut plot = Plot::new();
    plot.set_layout(
      Layout::new()
        .title(self.title.as_str())
        .auto_size(true)
        .height(plot_height)
        .margin(Margin::new().left(56).right(24).top(84).bottom(44))
        .annotations(annotations)
        .grid(
          LayoutGrid::new()
            .rows(rows)
            .columns(cols)
            .x_gap(x_gap)
            .y_gap(y_gap)
            .pattern(GridPattern::Independent),
        ),
    );

    for (idx, entry) in self.entries.iter().enumerate() {
      let xa = axis_name(idx + 1, "x");
      let ya = axis_name(idx + 1, "y");

      for series in &entry.series {
        match series.kind {
          TraceKind::Line => {
            let trace = Scatter::new(entry.x.clone(), series.values.clone())
              .mode(Mode::Lines)
              .line(Line::new().width(self.line_width))
              .name(series.label.as_str())
              .show_legend(self.show_legend)
              .x_axis(xa.as_str())
              .y_axis(ya.as_str());
            plot.add_trace(trace);
          }
          TraceKind::Bars => {
            let trace = Bar::new(entry.x.clone(), series.values.clone())
              .name(series.label.as_str())
              .width(0.2)
              .show_legend(self.show_legend)
              .x_axis(xa.as_str())
              .y_axis(ya.as_str());
            plot.add_trace(trace);
          }
        }
      }

      if let Some(band) = &entry.band {
        let upper = band.clone();
        let lower = band.iter().map(|b| -b).collect::<Vec<_>>();
        for level in [upper, lower] {
          let trace = Scatter::new(entry.x.clone(), level)
            .mode(Mode::Lines)
            .line(Line::new().width(1.0).dash(DashType::Dash).color("gray"))
            .name("confidence band")
            .show_legend(false)
            .x_axis(xa.as_str())
            .y_axis(ya.as_str());
          plot.add_trace(trace);
        }
      }
    }

    plot
  }
}

pub fn series_plot(values: &[f64], title: &str) -> Plot {
  GridPlotter::new()
    .title(title)
    .register_series(values, title)
    .plot()
}

/// ACF with its Bartlett band next to the PACF with the flat white-noise band.
pub fn correlogram_plot(
  acf: &[f64],
  pacf: &[f64],
  acf_band: &[f64],
  pacf_band: f64,
  title: &str,
) -> Plot {
  let flat = vec![pacf_band; pacf.len()];
  GridPlotter::new()
    .title(title)
    .cols(2)
    .register_correlogram(acf, "Autocorrelation", Some(acf_band))
    .register_correlogram(pacf, "Partial Autocorrelation", Some(flat.as_slice()))
    .plot()
}

pub fn periodogram_plot(pg: &PeriodogramResult, title: &str) -> Plot {
  GridPlotter::new()
    .title(title)
    .register_line(pg.frequencies.clone(), &pg.spectrum, "Periodogram")
    .plot()
}

/// Observed, trend, seasonal and residual panels stacked vertically.
pub fn decomposition_plot(d: &Decomposition, title: &str) -> Plot {
  GridPlotter::new()
    .title(title)
    .register_series(&d.observed.to_vec(), "Observed")
    .register_series(&d.trend.to_vec(), "Trend")
    .register_series(&d.seasonal.to_vec(), "Seasonal")
    .register_correlogram(&d.resid.to_vec(), "Residual", None)
    .plot()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::stats::acf::acf;
  use crate::stats::acf::bartlett_band;
  use crate::stats::acf::confidence_band;
  use crate::stats::acf::pacf;
  use crate::stats::decompose::seasonal_decompose;
  use crate::stats::spectral::PeriodogramConfig;
  use crate::stats::spectral::periodogram;
  use crate::stochastic::autoregressive::generate_ma1_seasonal_trend;

  fn sample() -> Vec<f64> {
    generate_ma1_seasonal_trend(100, 0.6, 0.6, 1.0, 43, 1.0 / 7.0, 0.1)
      .unwrap()
      .to_vec()
  }

  #[test]
  fn correlogram_has_bars_and_band_lines() {
    let y = sample();
    let r = acf(&y, 20).unwrap();
    let acf_band = bartlett_band(&r, y.len(), 0.05).unwrap();
    let band = confidence_band(y.len(), 0.05).unwrap();
    let plot = correlogram_plot(
      &r.to_vec(),
      &pacf(&y, 20).unwrap().to_vec(),
      &acf_band.to_vec(),
      band,
      "MA(1) with seasonality",
    );
    let json = plot.to_json();
    assert_eq!(json.matches("\"type\":\"bar\"").count(), 2);
    assert_eq!(json.matches("confidence band").count(), 4);
    assert!(json.contains("\"xaxis\":\"x2\""));
    assert!(json.contains("Partial Autocorrelation"));
  }

  #[test]
  fn acf_band_follows_lag_while_pacf_band_is_flat() {
    let acf_band = [0.0, 0.2, 0.25, 0.3];
    let plot = GridPlotter::new()
      .register_correlogram(&[1.0, 0.5, 0.2, 0.1], "acf", Some(&acf_band[..]))
      .register_correlogram(&[1.0, 0.5, 0.0, 0.0], "pacf", Some(&[0.2; 4][..]))
      .plot();
    let json = plot.to_json();
    // two bar traces plus an upper and lower envelope per panel
    assert_eq!(json.matches("\"type\":\"bar\"").count(), 2);
    assert_eq!(json.matches("\"type\":\"scatter\"").count(), 4);
    assert!(json.contains("\"y\":[0.0,0.2,0.25,0.3]"));
    assert!(json.contains("\"y\":[-0.0,-0.2,-0.25,-0.3]"));
    assert!(json.contains("\"y\":[0.2,0.2,0.2,0.2]"));
  }

  #[test]
  fn decomposition_uses_four_panels() {
    let d = seasonal_decompose(&sample(), 20).unwrap();
    let json = decomposition_plot(&d, "Seasonal decomposition").to_json();
    for name in ["Observed", "Trend", "Seasonal", "Residual"] {
      assert!(json.contains(name), "missing {name}");
    }
    assert!(json.contains("\"yaxis\":\"y4\""));
    assert!(json.contains("\"rows\":4"));
  }

  #[test]
  fn periodogram_and_series_plots_build() {
    let y = sample();
    let pg = periodogram(&y, PeriodogramConfig::default()).unwrap();
    let json = periodogram_plot(&pg, "Periodogram").to_json();
    assert!(json.contains("\"type\":\"scatter\""));

    let json = series_plot(&y, "MA(1)").to_json();
    assert!(json.contains("MA(1)"));
  }
}
