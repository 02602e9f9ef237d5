use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::GatewayConfig;
use crate::config::settings::{LogFormat, LoggingConfig};
use crate::utils::constants::DEFAULT_LOG_LEVEL;


#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "trace",
            LogLevel::DEBUG => "debug",
            LogLevel::INFO => "info",
            LogLevel::WARN => "warn",
            LogLevel::ERROR => "error",
        }
    }
}


/// Resolves the effective logging config: CLI/env level wins over the file.
pub fn resolve(gateway_config: &GatewayConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let (file_level, format) = gateway_config
        .settings
        .logging
        .as_ref()
        .map(|config| (config.level.to_owned(), config.format.to_owned()))
        .unwrap_or((DEFAULT_LOG_LEVEL.to_owned(), LogFormat::Compact));

    let level = arg_log_level
        .map(|level| level.as_str().to_owned())
        .unwrap_or(file_level);

    LoggingConfig::new(level, format)
}

pub fn run(gateway_config: &GatewayConfig, arg_log_level: Option<LogLevel>) {
    init_logging(&resolve(gateway_config, arg_log_level));
}


/// Initialize tracing with the desired config.
/// Everything goes to stderr; stdout is reserved for tool output.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_writer(std::io::stderr)
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr)
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}
