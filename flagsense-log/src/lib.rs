//! flagsense Logging
//!
//! Structured logging for flagsense, controlled by `FLAGSENSE_*`
//! environment variables.
//!
//! # Usage
//!
//! ```rust
//! use flagsense_log::{debug, info, warn};
//!
//! debug!("Decoding reason payload");
//! info!("Loaded {} reasons", 3);
//!
//! let key = "new-checkout";
//! warn!(target: "flagsense::evaluation", "Prerequisite {} failed", key);
//! ```
//!
//! # Environment Variables
//!
//! - `FLAGSENSE_DEBUG=1` - Enable debug logging
//! - `FLAGSENSE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `FLAGSENSE_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `FLAGSENSE_LOG_COLOR=1|0` - Enable/disable colors
//! - `FLAGSENSE_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `FLAGSENSE_LOG_MODULE=1|0` - Include the log target

use once_cell::sync::Lazy;
use std::env;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "FLAGSENSE_";

// ============================================================================
// Log Levels
// ============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Trace level (most verbose)
    Trace = 0,
    /// Debug level
    Debug = 1,
    /// Info level
    Info = 2,
    /// Warning level
    Warn = 3,
    /// Error level
    Error = 4,
    /// Off (no logging)
    Off = 5,
}

impl Level {
    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-column format with full timestamps
    Pretty,
    /// Compact single-line format
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled (pretty format only)
    pub color: bool,
    /// Whether to include timestamps
    pub timestamps: bool,
    /// Whether to include the log target
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    /// Create config from `FLAGSENSE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(format!("{ENV_PREFIX}{name}")).ok())
    }

    /// Create config from an arbitrary variable source.
    ///
    /// `lookup` receives names without the `FLAGSENSE_` prefix
    /// (`DEBUG`, `LOG_LEVEL`, ...). Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| lookup(name).map(|v| is_truthy(&v));

        let debug = flag("DEBUG").unwrap_or(false);

        let level = lookup("LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Json);

        let color = flag("LOG_COLOR").unwrap_or_else(color_supported);

        Self {
            debug,
            level,
            format,
            color,
            timestamps: flag("LOG_TIMESTAMPS").unwrap_or(true),
            module_path: flag("LOG_MODULE").unwrap_or(true),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn color_supported() -> bool {
    env::var("NO_COLOR").is_err() && env::var("TERM").is_ok()
}

// ============================================================================
// Public API
// ============================================================================

/// Initialize the logging system eagerly.
///
/// The first log macro call initializes it otherwise.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Check if debug logging is enabled.
#[inline]
pub fn is_debug_enabled() -> bool {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Check if a log level is enabled.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    Lazy::force(&CONFIG);
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Check if a message at `level` would be written.
///
/// Debug mode admits debug messages even when the level is higher.
#[inline]
pub fn is_enabled(level: Level) -> bool {
    is_level_enabled(level) || (level == Level::Debug && is_debug_enabled())
}

/// Get current log level.
pub fn current_level() -> Level {
    Lazy::force(&CONFIG);
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level at runtime.
pub fn set_level(level: Level) {
    Lazy::force(&CONFIG);
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Enable or disable debug mode at runtime.
pub fn set_debug(enabled: bool) {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

/// Get the global configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Log Output
// ============================================================================

/// Log a message with the given level.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_enabled(level) {
        return;
    }

    if let Some(line) = render(config(), level, target, message) {
        eprintln!("{}", line);
    }
}

/// Render one log line without writing it.
pub fn render(config: &LogConfig, level: Level, target: &str, message: &str) -> Option<String> {
    match config.format {
        Format::Pretty => Some(render_pretty(config, level, target, message)),
        Format::Compact => Some(render_compact(config, level, target, message)),
        Format::Json => render_json(level, target, message),
    }
}

fn render_pretty(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::new();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(line, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if config.color {
        let _ = write!(line, "{:5} ", level.colored());
    } else {
        let _ = write!(line, "{:5} ", level.as_str());
    }

    #[cfg(not(feature = "color"))]
    let _ = write!(line, "{:5} ", level.as_str());

    if config.module_path && !target.is_empty() {
        let _ = write!(line, "[{}] ", target);
    }

    line.push_str(message);
    line
}

fn render_compact(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::new();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(line, "{} ", now.format("%H:%M:%S"));
    }

    let _ = write!(line, "{} ", level.as_str().chars().next().unwrap_or('?'));

    if config.module_path && !target.is_empty() {
        let _ = write!(line, "{}: ", target);
    }

    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str) -> Option<String> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&entry).ok()
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str) -> Option<String> {
    Some(format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        escape_json(target),
        escape_json(message)
    ))
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_enabled($crate::Level::$level) {
            $crate::log($crate::Level::$level, $target, &format!($($arg)+));
        }
    };
    ($level:ident, $($arg:tt)+) => {
        $crate::__log_at!($level, target: module_path!(), $($arg)+)
    };
}

/// Log a debug message.
///
/// Enabled by `FLAGSENSE_DEBUG=1` or `FLAGSENSE_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log_at!(Debug, $($arg)+) };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log_at!(Info, $($arg)+) };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log_at!(Warn, $($arg)+) };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Subscriber that honours the flagsense log level unless `RUST_LOG`
    //! is set.

    use super::*;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    /// Build a tracing subscriber from the global configuration.
    pub fn subscriber() -> impl tracing::Subscriber {
        let config = config();
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(config.level));
        subscriber_with(filter, config.color)
    }

    /// Filter admitting events at `level` and above.
    pub fn level_filter(level: Level) -> EnvFilter {
        EnvFilter::new(level.as_str().to_lowercase())
    }

    fn subscriber_with(filter: EnvFilter, ansi: bool) -> impl tracing::Subscriber {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(ansi).with_writer(std::io::stderr))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use tracing::level_filters::LevelFilter;

        #[test]
        fn test_configured_level_drives_filter() {
            let config = LogConfig::from_lookup(|name| match name {
                "LOG_LEVEL" => Some("warn".to_string()),
                _ => None,
            });
            let filter = level_filter(config.level);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

            tracing::subscriber::with_default(subscriber_with(filter, false), || {
                assert!(tracing::enabled!(tracing::Level::WARN));
                assert!(tracing::enabled!(tracing::Level::ERROR));
                assert!(!tracing::enabled!(tracing::Level::INFO));
            });
        }

        #[test]
        fn test_off_level_disables_everything() {
            let filter = level_filter(Level::Off);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::OFF));
        }

        #[test]
        fn test_global_subscriber_builds() {
            tracing::subscriber::with_default(subscriber(), || {
                tracing::error!("subscriber accepts events");
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
