use tracing_subscriber::{EnvFilter, fmt};

/// Installs a stderr subscriber filtered by `RUST_LOG`. Does nothing when a
/// global subscriber is already set.
pub fn init() {
  let subscriber = fmt::Subscriber::builder()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .finish();
  if tracing::subscriber::set_global_default(subscriber).is_err() {
    tracing::debug!("tracing subscriber already installed");
  }
}

#[cfg(test)]
static INIT: std::sync::Once = std::sync::Once::new();

#[cfg(test)]
pub(crate) fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(fmt::format::FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}
