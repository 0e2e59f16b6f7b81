#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Errors are documented on InitializationError
    clippy::module_name_repetitions, // e.g. LoggingSystem in logging_system module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown
)]

//! Process-wide logging bootstrap for the dominion library.
//!
//! The first touch of [`get_logger`], [`is_loggable`], [`initialize`] or
//! [`system`] resolves the effective level from the environment, installs a
//! console logger on the host backend and prints the startup banner. Every
//! later touch only reads the resolved state.
//!
//! ```no_run
//! use dominion_logging::{Severity, get_logger, is_loggable};
//!
//! struct Scheduler;
//!
//! let logger = get_logger::<Scheduler>();
//! assert_eq!(logger.name(), "dominion.Scheduler");
//!
//! if is_loggable(Severity::Debug) {
//!     logger.debug(format_args!("tick"));
//! }
//! ```

pub mod app;
pub mod backend;
pub mod domain;

use std::sync::{Arc, LazyLock};

pub use app::{
    ConfigResolver, ConfigSource, EffectiveConfig, EnvSource, InitializationError,
    LayeredSource, LoggerHandle, LoggingSystem, ProcessState, PropertiesSource,
};
pub use backend::{BackendSettings, LogBackend, MessageFormat, TracingBackend};
pub use domain::Severity;

/// Namespace every library logger name starts with. Also the `tracing`
/// target the built-in backend emits under.
pub const NAMESPACE: &str = "dominion";

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static SYSTEM: LazyLock<LoggingSystem> = LazyLock::new(|| {
    LoggingSystem::new(
        Box::new(app::config::default_source()),
        Arc::new(TracingBackend::new()),
    )
});

/// Process-wide logging system, initialized on first access.
pub fn system() -> &'static LoggingSystem {
    SYSTEM.initialize_once();
    &SYSTEM
}

/// Runs the one-time initialization if it has not happened yet and returns
/// the resolved level.
pub fn initialize() -> Severity {
    SYSTEM.initialize_once()
}

/// Logger named after the calling component `T`, e.g. `dominion.Scheduler`.
pub fn get_logger<T: ?Sized>() -> LoggerHandle {
    system().logger_for::<T>()
}

/// Logger for a component identified by name instead of by type.
pub fn get_logger_named(component: &str) -> LoggerHandle {
    system().logger_named(component)
}

/// Whether a message at `candidate` would pass the process-wide level.
pub fn is_loggable(candidate: Severity) -> bool {
    system().is_loggable(candidate)
}

/// Logger named after the enclosing module, e.g. `dominion.scheduler` when
/// invoked from `my_crate::scheduler`.
#[macro_export]
macro_rules! logger {
    () => {
        $crate::get_logger_named($crate::app::logger::component_name_from_path(module_path!()))
    };
    ($component:ty) => {
        $crate::get_logger::<$component>()
    };
}
