use super::{BackendSettings, LogBackend, MessageFormat};
use crate::NAMESPACE;
use crate::app::InitializationError;
use crate::domain::Severity;
use parking_lot::Mutex;
use std::fmt::{self, Arguments};
use std::panic::Location;
use std::sync::OnceLock;
use tracing::Dispatch;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt as fmt_layer, prelude::*};

struct Installed {
    dispatch: Dispatch,
    format: MessageFormat,
}

/// Built-in backend on top of `tracing`.
///
/// `configure` builds a private dispatcher: a `Targets` filter holding the
/// library root level and a single `fmt` console layer with the same level.
/// The library's messages are emitted through that dispatcher only, so the
/// host's global subscriber, if any, is neither replaced nor filtered.
pub struct TracingBackend {
    writer: Mutex<Option<BoxMakeWriter>>,
    ansi: bool,
    installed: OnceLock<Installed>,
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self {
            writer: Mutex::new(Some(BoxMakeWriter::new(std::io::stderr))),
            ansi: true,
            installed: OnceLock::new(),
        }
    }
}

impl fmt::Debug for TracingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingBackend")
            .field("ansi", &self.ansi)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl TracingBackend {
    /// Backend writing to stderr.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend writing its console output to `writer`, without ANSI colors.
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self {
            writer: Mutex::new(Some(BoxMakeWriter::new(writer))),
            ansi: false,
            installed: OnceLock::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.installed.get().is_some()
    }
}

impl LogBackend for TracingBackend {
    fn configure(&self, settings: &BackendSettings) -> Result<(), InitializationError> {
        let writer = self
            .writer
            .lock()
            .take()
            .ok_or_else(|| InitializationError::BackendInitFailed {
                details: "Console handler already attached".to_string(),
                source: Box::new(std::io::Error::other("tracing backend configured twice")),
            })?;

        let root_filter = Targets::new().with_target(settings.root, settings.level);

        let console = fmt_layer::layer()
            .with_writer(writer)
            .with_target(false)
            .with_level(true)
            .with_ansi(self.ansi)
            .compact()
            .with_filter(settings.level);

        let dispatch = Dispatch::new(tracing_subscriber::registry().with(root_filter).with(console));

        self.installed
            .set(Installed {
                dispatch,
                format: settings.format,
            })
            .map_err(|_| InitializationError::BackendInitFailed {
                details: "Console handler already attached".to_string(),
                source: Box::new(std::io::Error::other("tracing backend configured twice")),
            })
    }

    fn log(
        &self,
        logger: &str,
        level: Severity,
        caller: &'static Location<'static>,
        args: Arguments<'_>,
    ) {
        // Nothing to write to before the console handler exists
        let Some(installed) = self.installed.get() else {
            return;
        };
        let message = installed.format.render(logger, caller, args);

        tracing::dispatcher::with_default(&installed.dispatch, || match level {
            Severity::All | Severity::Trace => tracing::trace!(target: NAMESPACE, "{}", message),
            Severity::Debug => tracing::debug!(target: NAMESPACE, "{}", message),
            Severity::Info => tracing::info!(target: NAMESPACE, "{}", message),
            Severity::Warning => tracing::warn!(target: NAMESPACE, "{}", message),
            Severity::Error => tracing::error!(target: NAMESPACE, "{}", message),
            Severity::Off => {}
        });
    }

    fn is_platform_default(&self) -> bool {
        true
    }
}
