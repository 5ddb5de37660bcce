//! Utilities for logging.
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Json,
}

/// Configure the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set. Does nothing if
/// a global subscriber is already installed.
pub fn configure_global_logger<W>(default_level: Level, format: LogFormat, make_writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(make_writer);

    let _ = match format {
        LogFormat::HumanReadable => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Install a subscriber that writes through the test harness.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .try_init();
}
