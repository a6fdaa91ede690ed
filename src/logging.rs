use tracing_subscriber::EnvFilter;

/// Targets that receive log output by default.
const CRATE_TARGETS: &[&str] = &["synthetic_ts", "lectures"];

/// Install the global subscriber.
///
/// Defaults to `info` for this crate; `RUST_LOG` overrides it when set.
pub fn init() {
  let default_filter = CRATE_TARGETS
    .iter()
    .map(|t| format!("{t}=info"))
    .collect::<Vec<_>>()
    .join(",");

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt().with_env_filter(filter).init();
}
