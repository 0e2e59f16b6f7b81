//! Host logging backend contract.
//!
//! The bootstrap only needs two things from a backend: a one-time
//! `configure` call that installs the library root level, a console
//! handler and the message format, and a `log` call that emits a message
//! for a named logger. [`TracingBackend`] is the built-in implementation;
//! anything else implementing [`LogBackend`] can be plugged into a
//! [`LoggingSystem`](crate::LoggingSystem).

mod tracing_backend;

pub use tracing_backend::TracingBackend;

use crate::app::InitializationError;
use crate::domain::Severity;
use std::fmt::Arguments;
use std::panic::Location;
use tracing::level_filters::LevelFilter;

/// Message layout: `<logger> - <message>`. With `log_caller` set the call
/// site is prefixed as `[file:line] `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageFormat {
    log_caller: bool,
}

impl MessageFormat {
    pub fn new(log_caller: bool) -> Self {
        Self { log_caller }
    }

    pub fn log_caller(&self) -> bool {
        self.log_caller
    }

    pub fn render(&self, logger: &str, caller: &Location<'_>, args: Arguments<'_>) -> String {
        if self.log_caller {
            format!("[{}:{}] {logger} - {args}", caller.file(), caller.line())
        } else {
            format!("{logger} - {args}")
        }
    }
}

/// What the initializer asks the backend to install.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    /// Root logger name for the library.
    pub root: &'static str,
    /// Minimum level for both the root logger and its console handler.
    pub level: LevelFilter,
    pub format: MessageFormat,
}

pub trait LogBackend: Send + Sync {
    /// Sets the root level, attaches the console handler and stores the
    /// message format. Called at most once per [`LoggingSystem`](crate::LoggingSystem).
    fn configure(&self, settings: &BackendSettings) -> Result<(), InitializationError>;

    /// Emits `args` for `logger`. `caller` is where the message was logged.
    fn log(
        &self,
        logger: &str,
        level: Severity,
        caller: &'static Location<'static>,
        args: Arguments<'_>,
    );

    /// Whether this is the backend the crate ships with. Only affects the
    /// startup banner.
    fn is_platform_default(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format_without_caller() {
        let format = MessageFormat::new(false);
        assert!(!format.log_caller());
        assert_eq!(
            format.render(
                "dominion.World",
                Location::caller(),
                format_args!("spawned {} entities", 3)
            ),
            "dominion.World - spawned 3 entities"
        );
    }

    #[test]
    fn test_message_format_with_caller() {
        let format = MessageFormat::new(true);
        let caller = Location::caller();
        assert_eq!(
            format.render("dominion.World", caller, format_args!("spawned {} entities", 3)),
            format!(
                "[{}:{}] dominion.World - spawned 3 entities",
                caller.file(),
                caller.line()
            )
        );
    }

    #[test]
    fn test_logger_name_distinguishes_components() {
        let format = MessageFormat::default();
        let caller = Location::caller();
        assert_ne!(
            format.render("dominion.Foo", caller, format_args!("x")),
            format.render("dominion.Bar", caller, format_args!("x"))
        );
    }

    #[test]
    fn test_default_format_omits_caller() {
        assert_eq!(MessageFormat::default(), MessageFormat::new(false));
    }
}
