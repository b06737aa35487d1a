//! Log configuration and subscriber setup for the translator.

use std::env;
use std::fmt;
use std::sync::OnceLock;

/// Output format for translator log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "plain" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        })
    }
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" | "err" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" | "verbose" => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn as_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    }
}

/// Effective log configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogOptions {
    pub const DEFAULT: Self = Self {
        format: LogFormat::Text,
        level: LogLevel::Warn,
    };

    /// Defaults overridden by `JTRAN_LOG_FORMAT` / `JTRAN_LOG_LEVEL`.
    #[must_use]
    pub fn from_env() -> Self {
        let format = env::var("JTRAN_LOG_FORMAT").ok();
        let level = env::var("JTRAN_LOG_LEVEL").ok();
        apply_overrides(Self::DEFAULT, format.as_deref(), level.as_deref())
    }

    /// Apply command-line overrides on top of `self`.
    #[must_use]
    pub fn with_overrides(self, format: Option<LogFormat>, level: Option<LogLevel>) -> Self {
        Self {
            format: format.unwrap_or(self.format),
            level: level.unwrap_or(self.level),
        }
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn apply_overrides(mut options: LogOptions, format: Option<&str>, level: Option<&str>) -> LogOptions {
    if let Some(value) = format.and_then(LogFormat::parse) {
        options.format = value;
    }
    if let Some(value) = level.and_then(LogLevel::parse) {
        options.level = value;
    }
    options
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init(options: &LogOptions) {
    use std::io::IsTerminal;
    use tracing_subscriber::fmt;

    static INITIALISED: OnceLock<()> = OnceLock::new();

    INITIALISED.get_or_init(|| {
        let use_ansi = env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let builder = fmt::fmt()
            .with_max_level(options.level.as_tracing_level())
            .with_writer(std::io::stderr)
            .with_target(true);

        match options.format {
            LogFormat::Json => {
                let subscriber = builder.with_ansi(false).json().finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
            }
            LogFormat::Text => {
                let subscriber = builder.with_ansi(use_ansi).compact().finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
            }
        }
    });
}
