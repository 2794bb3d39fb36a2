//! Console diagnostics for the load pipeline.
//!
//! Status lines go to stderr so stdout stays clean for preview and
//! fetch payloads.

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        }
    }
}

/// Print a status line at the given level.
pub fn log(level: LogLevel, message: impl AsRef<str>) {
    eprintln!("{} {}", level.prefix(), message.as_ref());
}

pub fn log_info(message: impl AsRef<str>) {
    log(LogLevel::Info, message);
}

pub fn log_success(message: impl AsRef<str>) {
    log(LogLevel::Success, message);
}

pub fn log_warning(message: impl AsRef<str>) {
    log(LogLevel::Warning, message);
}

pub fn log_error(message: impl AsRef<str>) {
    log(LogLevel::Error, message);
}
