use super::logging_system::ProcessState;
use crate::backend::LogBackend;
use crate::domain::Severity;
use std::fmt::{self, Arguments};
use std::panic::Location;
use std::sync::Arc;

/// Named logger handed out to library components.
///
/// Cheap to create. Messages below the process-wide level are dropped before
/// they are formatted.
#[derive(Clone)]
pub struct LoggerHandle {
    name: String,
    backend: Arc<dyn LogBackend>,
    state: Arc<ProcessState>,
}

impl LoggerHandle {
    pub(crate) fn new(name: String, backend: Arc<dyn LogBackend>, state: Arc<ProcessState>) -> Self {
        Self {
            name,
            backend,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self, level: Severity) -> bool {
        self.state.is_loggable(level)
    }

    /// Logs at `level`. The backend receives the location of the caller.
    #[track_caller]
    pub fn log(&self, level: Severity, args: Arguments<'_>) {
        if self.is_enabled(level) {
            self.backend.log(&self.name, level, Location::caller(), args);
        }
    }

    #[track_caller]
    pub fn trace(&self, args: Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, args: Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    #[track_caller]
    pub fn warn(&self, args: Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: Arguments<'_>) {
        self.log(Severity::Error, args);
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.name)
            .field("active", &self.state.active())
            .finish()
    }
}

/// Simple name of `T`: module path and generic arguments stripped, so
/// `my_crate::world::Archetype<u32>` becomes `Archetype`.
pub fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    component_name_from_path(without_generics)
}

/// Last segment of a `::`-separated path.
pub fn component_name_from_path(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
