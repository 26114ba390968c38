//! Logging configuration and logfmt-style log lines
//!
//! Log lines are rendered as sorted, space-separated `key=value` pairs. Debug
//! and info lines reach stderr only when the console level allows it; warn
//! lines always do. Every line is also emitted through `tracing`.

use crate::core::config::ClientConfig;
use crate::core::constants::{defaults::LOG_TARGET, env};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified level
///
/// `RUST_LOG` wins when set. Unknown levels fall back to "info". Returns
/// `false` if a global subscriber was already installed.
///
/// # Arguments
///
/// * `log_level` - The log level string (debug, info, warning, error, critical)
pub fn init_logging(log_level: &str) -> bool {
    let level = log_level
        .split_whitespace()
        .next()
        .unwrap_or("info")
        .to_lowercase();

    let final_level = match level.as_str() {
        "warning" => "warn",
        "critical" => "error",
        "trace" | "debug" | "info" | "warn" | "error" => level.as_str(),
        _ => "info",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(final_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

/// Console verbosity for log lines written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Debug,
}

impl ConsoleLevel {
    fn parse(label: &str) -> Option<Self> {
        match label {
            "debug" => Some(ConsoleLevel::Debug),
            "info" => Some(ConsoleLevel::Info),
            _ => None,
        }
    }
}

/// Explicit setting first, then the environment fallback; anything else
/// suppresses console output.
fn resolve_console_level(explicit: Option<&str>, from_env: Option<&str>) -> Option<ConsoleLevel> {
    explicit
        .and_then(ConsoleLevel::parse)
        .or_else(|| from_env.and_then(ConsoleLevel::parse))
}

/// Console level in effect for `config`
pub fn console_log_level(config: &ClientConfig) -> Option<ConsoleLevel> {
    let from_env = std::env::var(env::LOG).ok();
    resolve_console_level(config.log.as_deref(), from_env.as_deref())
}

/// A value attached to a log line
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl LogValue {
    fn render(&self) -> String {
        match self {
            LogValue::Text(text) => text.clone(),
            LogValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        LogValue::Text(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        LogValue::Text(value)
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        LogValue::Text(value.clone())
    }
}

impl From<Vec<u8>> for LogValue {
    fn from(value: Vec<u8>) -> Self {
        LogValue::Bytes(value)
    }
}

impl From<&[u8]> for LogValue {
    fn from(value: &[u8]) -> Self {
        LogValue::Bytes(value.to_vec())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => LogValue::Text(text),
            other => LogValue::Text(other.to_string()),
        }
    }
}

macro_rules! log_value_from_display {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                LogValue::Text(value.to_string())
            }
        })*
    };
}

log_value_from_display!(bool, i32, i64, u16, u32, u64, usize, f32, f64);

/// Quote `text` with escapes so it stays a single whitespace-delimited token
fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            // non-printable: controls and any whitespace other than a plain space
            c if c.is_control() || (c.is_whitespace() && c != ' ') => {
                let code = c as u32;
                if code <= 0xff {
                    let _ = write!(out, "\\x{code:02x}");
                } else {
                    let _ = write!(out, "\\u{code:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

fn token(text: String) -> String {
    if text.chars().any(char::is_whitespace) {
        quote(&text)
    } else {
        text
    }
}

/// Render properties as sorted `key=value` pairs joined by single spaces
pub fn logfmt(props: &BTreeMap<String, LogValue>) -> String {
    props
        .iter()
        .map(|(key, value)| format!("{}={}", token(key.clone()), token(value.render())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a log line for `message` and its properties
///
/// A property named `message` replaces the message argument.
pub fn format_logline(message: &str, props: &[(&str, LogValue)]) -> String {
    let mut combined = BTreeMap::new();
    combined.insert("message".to_string(), LogValue::from(message));
    for (key, value) in props {
        combined.insert((*key).to_string(), value.clone());
    }
    logfmt(&combined)
}

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

/// Whether a line of `severity` goes to the console at `level`
///
/// Debug needs the debug level, info needs any level, warn always prints.
pub fn prints_to_console(severity: Severity, level: Option<ConsoleLevel>) -> bool {
    match severity {
        Severity::Debug => level == Some(ConsoleLevel::Debug),
        Severity::Info => level.is_some(),
        Severity::Warn => true,
    }
}

/// Render the line, write it to `out` if the console gate passes, and
/// record it through `tracing`. Returns the rendered line.
fn emit<W: Write>(
    out: &mut W,
    severity: Severity,
    level: Option<ConsoleLevel>,
    message: &str,
    props: &[(&str, LogValue)],
) -> String {
    let line = format_logline(message, props);
    if prints_to_console(severity, level) {
        let _ = writeln!(out, "{line}");
    }
    match severity {
        Severity::Debug => debug!(target: LOG_TARGET, "{}", line),
        Severity::Info => info!(target: LOG_TARGET, "{}", line),
        Severity::Warn => warn!(target: LOG_TARGET, "{}", line),
    }
    line
}

/// Log at debug level; printed to stderr when the console level is debug
pub fn log_debug(config: &ClientConfig, message: &str, props: &[(&str, LogValue)]) {
    let level = console_log_level(config);
    emit(&mut io::stderr().lock(), Severity::Debug, level, message, props);
}

/// Log at info level; printed to stderr when the console level is info or debug
pub fn log_info(config: &ClientConfig, message: &str, props: &[(&str, LogValue)]) {
    let level = console_log_level(config);
    emit(&mut io::stderr().lock(), Severity::Info, level, message, props);
}

/// Log at warn level; always printed to stderr
pub fn log_warn(config: &ClientConfig, message: &str, props: &[(&str, LogValue)]) {
    let level = console_log_level(config);
    emit(&mut io::stderr().lock(), Severity::Warn, level, message, props);
}
