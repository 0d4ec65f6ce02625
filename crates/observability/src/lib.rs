//! Logging setup shared by the binaries.

/// Selects JSON output when set to `json`.
pub const LOG_FORMAT_ENV: &str = "LIBRIS_LOG_FORMAT";

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Subscriber construction.
pub mod tracing {
    use tracing_subscriber::EnvFilter;

    use super::LogFormat;

    /// Install an `fmt` subscriber on stderr, filtered by `RUST_LOG` (default `info`).
    pub fn init(format: LogFormat) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = match format {
            LogFormat::Json => builder
                .json()
                .with_timer(tracing_subscriber::fmt::time::SystemTime)
                .try_init(),
            LogFormat::Text => builder.try_init(),
        };
    }
}
