use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "pacer_engine=debug,wgpu=warn"). When unset, `RUST_LOG` is consulted, then
/// `default_level` applies with the GPU stack held at `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Crates that log per-frame at info level and drown out the FPS line.
const NOISY_CRATES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Picks the filter string: explicit config, then `RUST_LOG`, then the default.
fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> String {
    if let Some(filter) = &config.env_filter {
        return filter.clone();
    }
    if let Some(filter) = rust_log.filter(|f| !f.trim().is_empty()) {
        return filter;
    }

    let mut filter = config.default_level.to_string().to_lowercase();
    for name in NOISY_CRATES {
        filter.push_str(&format!(",{name}=warn"));
    }
    filter
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(&config, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.format_timestamp_millis();

        // A logger installed elsewhere (tests, embedding host) wins.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized ({filter})");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let config = LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(resolve_filter(&config, Some("trace".into())), "debug");
    }

    #[test]
    fn env_filter_used_when_config_unset() {
        let config = LoggingConfig::default();
        assert_eq!(resolve_filter(&config, Some("pacer_engine=trace".into())), "pacer_engine=trace");
    }

    #[test]
    fn blank_env_falls_back_to_default_level() {
        let config = LoggingConfig::default();
        let filter = resolve_filter(&config, Some("  ".into()));
        assert!(filter.starts_with("info,"));
        assert!(filter.contains("wgpu_core=warn"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
