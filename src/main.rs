mod logging;

use std::fs;
use std::path::Path;
use std::process;

use anyhow::Context;
use anyhow::Result;
use ndarray::Array1;
use synthetic_ts::io::export_dataset;
use synthetic_ts::io::read_series_csv;
use synthetic_ts::scenarios::ArScenario;
use synthetic_ts::scenarios::Arma1Scenario;
use synthetic_ts::scenarios::DiagnosticsConfig;
use synthetic_ts::scenarios::Ma1Scenario;
use synthetic_ts::scenarios::OUTPUT_DIR;
use synthetic_ts::stats::acf::acf;
use synthetic_ts::stats::acf::bartlett_band;
use synthetic_ts::stats::acf::confidence_band;
use synthetic_ts::stats::acf::pacf;
use synthetic_ts::stats::ar_fit::ArFit;
use synthetic_ts::stats::decompose::seasonal_decompose;
use synthetic_ts::stats::spectral::PeriodogramConfig;
use synthetic_ts::stats::spectral::dominant_frequency;
use synthetic_ts::stats::spectral::periodogram;
use synthetic_ts::visualization::correlogram_plot;
use synthetic_ts::visualization::decomposition_plot;
use synthetic_ts::visualization::periodogram_plot;
use synthetic_ts::visualization::series_plot;
use tracing::info;
use tracing::info_span;

fn main() {
  logging::init();

  if let Err(e) = run() {
    eprintln!("Error: {e:#}");
    process::exit(1);
  }
}

fn run() -> Result<()> {
  let out = Path::new(OUTPUT_DIR);
  fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
  let cfg = DiagnosticsConfig::default();

  lecture2(out, &cfg)?;
  lecture3(out, &cfg)?;
  Ok(())
}

/// AR datasets, CSV round trip, PACF and an AR(7) fit with forecast.
fn lecture2(out: &Path, cfg: &DiagnosticsConfig) -> Result<()> {
  let _span = info_span!("lecture2").entered();

  let scenarios = [
    ArScenario::dataset1(),
    ArScenario::dataset2(),
    ArScenario::dataset3(),
  ];
  let mut last = None;
  for s in &scenarios {
    let x = s
      .generate()
      .with_context(|| format!("generating {}", s.label))?;
    let path = export_dataset(out, &s.label, &x, s.order())
      .with_context(|| format!("exporting {}", s.label))?;
    last = Some(path);
  }

  let path = last.context("no dataset exported")?;
  let data = read_series_csv(&path).with_context(|| format!("reading {}", path.display()))?;
  println!("{} (first rows)", data.label);
  for v in data.values.iter().take(5) {
    println!("  {v:.6}");
  }

  let y = data.values.to_vec();
  write_html(
    correlogram(&y, &data.label, cfg)?,
    &out.join(format!("{}_correlogram.html", data.label)),
  );

  let fit = ArFit::fit(&y, cfg.ar_order).context("fitting AR model")?;
  println!("\nFitted AR(p={}) model summary:", cfg.ar_order);
  println!("{fit}");

  println!("\n{}-step ahead forecast:", cfg.horizon);
  for (h, v) in fit.forecast(cfg.horizon).iter().enumerate() {
    println!("  {:>3}  {v:.6}", y.len() + h);
  }

  Ok(())
}

/// MA(1) and ARMA(1)-like series with seasonality and trend.
fn lecture3(out: &Path, cfg: &DiagnosticsConfig) -> Result<()> {
  let _span = info_span!("lecture3").entered();

  let ma = Ma1Scenario::default();
  let plain = ma.generate()?;
  write_html(series_plot(&plain.to_vec(), "MA(1)"), &out.join("ma1.html"));

  let ma_seasonal = ma.generate_seasonal_trend()?;
  diagnose("ma1_seasonal_trend", &ma_seasonal, out, cfg)?;

  let arma = Arma1Scenario::default().generate()?;
  diagnose("arma1_seasonal_trend", &arma, out, cfg)?;

  Ok(())
}

fn diagnose(name: &str, series: &Array1<f64>, out: &Path, cfg: &DiagnosticsConfig) -> Result<()> {
  let y = series.to_vec();
  write_html(series_plot(&y, name), &out.join(format!("{name}.html")));

  write_html(
    correlogram(&y, name, cfg)?,
    &out.join(format!("{name}_correlogram.html")),
  );

  let pg = periodogram(&y, PeriodogramConfig::default())?;
  let period = pg.mean_period()?;
  println!("{name}: T = 1 / mean(frequencies) = {period}");
  if let Some(peak) = dominant_frequency(&pg) {
    info!(
      series = name,
      frequency = peak.frequency,
      period = ?peak.period,
      "dominant spectral peak"
    );
  }
  write_html(
    periodogram_plot(&pg, name),
    &out.join(format!("{name}_periodogram.html")),
  );

  let d = seasonal_decompose(&y, cfg.period)
    .with_context(|| format!("decomposing {name} with period {}", cfg.period))?;
  write_html(
    decomposition_plot(&d, name),
    &out.join(format!("{name}_decomposition.html")),
  );

  Ok(())
}

/// ACF with its Bartlett band, PACF with the white-noise band.
fn correlogram(y: &[f64], title: &str, cfg: &DiagnosticsConfig) -> Result<plotly::Plot> {
  let r = acf(y, cfg.nlags)?;
  let acf_band = bartlett_band(&r, y.len(), cfg.alpha)?;
  let p = pacf(y, cfg.nlags)?;
  let band = confidence_band(y.len(), cfg.alpha)?;
  Ok(correlogram_plot(
    &r.to_vec(),
    &p.to_vec(),
    &acf_band.to_vec(),
    band,
    title,
  ))
}

fn write_html(plot: plotly::Plot, path: &Path) {
  plot.write_html(path);
  info!(path = %path.display(), "wrote chart");
}
