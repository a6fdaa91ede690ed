//! # Tabular I/O
//!
//! $$
//! (\text{label}, x_{p:n-1}) \mapsto \texttt{label}\,\backslash n\,x_p\,\backslash n \cdots
//! $$
//!
//! Single-column CSV: the header is the series label, then one value per
//! line. Values use the shortest round-trip `f64` formatting, so reading a
//! file back yields the exact sequence that was written.
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use ndarray::Array1;
use tracing::debug;
use tracing::info;

use crate::error::Result;
use crate::error::SynthError;

/// A series together with its column label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelledSeries {
  pub label: String,
  pub values: Array1<f64>,
}

/// Drop the leading `prefix` values (the zero burn-in of a generator).
pub fn trim_burn_in(series: &Array1<f64>, prefix: usize) -> Result<Array1<f64>> {
  if prefix >= series.len() {
    return Err(SynthError::InvalidLength {
      n: series.len(),
      prefix,
    });
  }
  Ok(series.slice(ndarray::s![prefix..]).to_owned())
}

fn validate_label(label: &str) -> Result<()> {
  if label.is_empty() || label.trim() != label || label.contains([',', '\n', '\r', '"']) {
    return Err(SynthError::InvalidLabel(label.to_string()));
  }
  Ok(())
}

pub fn write_series<W: Write>(writer: W, label: &str, series: &Array1<f64>) -> Result<()> {
  validate_label(label)?;
  let mut w = BufWriter::new(writer);
  writeln!(w, "{label}")?;
  for v in series {
    writeln!(w, "{v}")?;
  }
  w.flush()?;
  Ok(())
}

pub fn write_series_csv<P: AsRef<Path>>(path: P, label: &str, series: &Array1<f64>) -> Result<()> {
  let path = path.as_ref();
  write_series(File::create(path)?, label, series)?;
  info!(path = %path.display(), label, rows = series.len(), "wrote series");
  Ok(())
}

pub fn read_series<R: Read>(reader: R) -> Result<LabelledSeries> {
  let mut lines = BufReader::new(reader).lines();

  let label = match lines.next() {
    Some(line) => line?.trim().to_string(),
    None => {
      return Err(SynthError::Csv {
        line: 1,
        reason: "empty input".into(),
      });
    }
  };
  if label.is_empty() {
    return Err(SynthError::Csv {
      line: 1,
      reason: "missing header".into(),
    });
  }
  let columns = label.split(',').count();
  if columns != 1 {
    return Err(SynthError::Csv {
      line: 1,
      reason: format!("expected a single column, header has {columns}"),
    });
  }

  let mut values = Vec::new();
  for (i, line) in lines.enumerate() {
    let line = line?;
    let lineno = i + 2;
    let cell = line.trim();
    if cell.is_empty() {
      continue;
    }
    let fields = cell.split(',').count();
    if fields != 1 {
      return Err(SynthError::Csv {
        line: lineno,
        reason: format!("expected 1 column, found {fields}"),
      });
    }
    let v = cell.parse::<f64>().map_err(|e| SynthError::Csv {
      line: lineno,
      reason: format!("invalid number {cell:?}: {e}"),
    })?;
    values.push(v);
  }

  debug!(label, rows = values.len(), "read series");
  Ok(LabelledSeries {
    label,
    values: Array1::from_vec(values),
  })
}

pub fn read_series_csv<P: AsRef<Path>>(path: P) -> Result<LabelledSeries> {
  read_series(File::open(path)?)
}

/// Write `series` without its zero prefix to `<dir>/<label>.csv`.
pub fn export_dataset<P: AsRef<Path>>(
  dir: P,
  label: &str,
  series: &Array1<f64>,
  burn_in: usize,
) -> Result<PathBuf> {
  let path = dir.as_ref().join(format!("{label}.csv"));
  write_series_csv(&path, label, &trim_burn_in(series, burn_in)?)?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;
  use tracing_test::traced_test;

  use super::*;
  use crate::stochastic::autoregressive::generate_ar;

  #[test]
  fn trim_drops_exactly_the_prefix() {
    let x = arr1(&[0.0, 0.0, 1.5, -2.0]);
    assert_eq!(trim_burn_in(&x, 2).unwrap(), arr1(&[1.5, -2.0]));
    assert!(matches!(
      trim_burn_in(&x, 4),
      Err(SynthError::InvalidLength { n: 4, prefix: 4 })
    ));
  }

  #[test]
  fn writes_header_then_one_value_per_line() {
    let mut buf = Vec::new();
    write_series(&mut buf, "dataset1", &arr1(&[0.5, -1.25, 3.0])).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "dataset1\n0.5\n-1.25\n3\n");
  }

  #[test]
  #[traced_test]
  fn file_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let x = generate_ar(107, &[-0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.8], 1.0, 42).unwrap();

    let path = export_dataset(dir.path(), "dataset3", &x, 7).unwrap();
    assert_eq!(path, dir.path().join("dataset3.csv"));
    assert!(logs_contain("wrote series"));

    let back = read_series_csv(&path).unwrap();
    assert_eq!(back.label, "dataset3");
    assert_eq!(back.values.len(), 100);
    assert_eq!(back.values, x.slice(ndarray::s![7..]).to_owned());
  }

  #[test]
  fn parse_errors_carry_line_numbers() {
    let err = read_series("x\n1.0\nabc\n".as_bytes()).unwrap_err();
    assert!(matches!(err, SynthError::Csv { line: 3, .. }));

    let err = read_series("x\n1.0,2.0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, SynthError::Csv { line: 2, .. }));

    let err = read_series("a,b\n1.0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, SynthError::Csv { line: 1, .. }));

    let err = read_series("".as_bytes()).unwrap_err();
    assert!(matches!(err, SynthError::Csv { line: 1, .. }));
  }

  #[test]
  fn header_only_reads_as_empty_series() {
    let s = read_series("dataset1\n".as_bytes()).unwrap();
    assert_eq!(s.label, "dataset1");
    assert!(s.values.is_empty());
  }

  #[test]
  fn labels_that_break_the_format_are_rejected() {
    let x = arr1(&[1.0]);
    assert!(matches!(
      write_series(Vec::new(), "a,b", &x),
      Err(SynthError::InvalidLabel(_))
    ));
    assert!(write_series(Vec::new(), "", &x).is_err());
    for label in [" dataset1", "dataset1 ", "\tdataset1"] {
      assert!(matches!(
        write_series(Vec::new(), label, &x),
        Err(SynthError::InvalidLabel(_))
      ));
    }
  }

  #[test]
  fn accepted_labels_survive_a_round_trip() {
    for label in ["dataset1", "MA(1) seasonal", "série_α"] {
      let mut buf = Vec::new();
      write_series(&mut buf, label, &arr1(&[1.0])).unwrap();
      assert_eq!(read_series(buf.as_slice()).unwrap().label, label);
    }
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_series_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, SynthError::Io(_)));
  }
}
