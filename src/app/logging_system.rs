use super::banner::BannerPrinter;
use super::config::{ConfigResolver, ConfigSource, EffectiveConfig};
use super::initialization::{InitializationError, report};
use super::logger::{LoggerHandle, simple_type_name};
use super::version::{UNKNOWN_VERSION, fetch_revision};
use crate::NAMESPACE;
use crate::backend::{BackendSettings, LogBackend, MessageFormat};
use crate::domain::Severity;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

/// Supplies the version shown in the banner.
pub type VersionProvider = fn() -> Result<String, InitializationError>;

/// Active level plus the one-time initialization cell.
///
/// The active level reads as `Info` until initialization records the
/// resolved one; it is written exactly once.
#[derive(Debug)]
pub struct ProcessState {
    active: AtomicU8,
    resolved: OnceLock<Severity>,
}

impl Default for ProcessState {
    fn default() -> Self {
        Self {
            active: AtomicU8::new(Severity::default().ordinal()),
            resolved: OnceLock::new(),
        }
    }
}

impl ProcessState {
    pub fn active(&self) -> Severity {
        Severity::from_ordinal(self.active.load(Ordering::Acquire))
    }

    pub fn is_initialized(&self) -> bool {
        self.resolved.get().is_some()
    }

    pub fn is_loggable(&self, candidate: Severity) -> bool {
        let active = self.active();
        active != Severity::Off && candidate >= active
    }

    pub(crate) fn record(&self, level: Severity) {
        self.active.store(level.ordinal(), Ordering::Release);
    }
}

/// Wires resolved configuration into a logging backend, once.
pub struct LoggingSystem {
    source: Box<dyn ConfigSource>,
    backend: Arc<dyn LogBackend>,
    banner_out: Mutex<Box<dyn Write + Send>>,
    version: VersionProvider,
    state: Arc<ProcessState>,
}

impl LoggingSystem {
    /// System printing its banner to stdout with the packaged version.
    pub fn new(source: Box<dyn ConfigSource>, backend: Arc<dyn LogBackend>) -> Self {
        Self {
            source,
            backend,
            banner_out: Mutex::new(Box::new(std::io::stdout())),
            version: fetch_revision,
            state: Arc::new(ProcessState::default()),
        }
    }

    pub fn with_banner_writer(mut self, out: Box<dyn Write + Send>) -> Self {
        self.banner_out = Mutex::new(out);
        self
    }

    pub fn with_version_provider(mut self, version: VersionProvider) -> Self {
        self.version = version;
        self
    }

    /// Runs initialization on the first call and returns the resolved level.
    ///
    /// Concurrent first callers block until the single run has finished;
    /// every later call only reads the stored level.
    pub fn initialize_once(&self) -> Severity {
        *self
            .state
            .resolved
            .get_or_init(|| self.run_initialization())
    }

    fn run_initialization(&self) -> Severity {
        let config = ConfigResolver::new(self.source.as_ref())
            .resolve()
            .unwrap_or_else(|e| {
                report(&e);
                EffectiveConfig::default()
            });

        let level = match self.configure_backend(&config) {
            Ok(()) => config.severity,
            Err(e) => {
                report(&e);
                Severity::default()
            }
        };
        self.state.record(level);

        tracing::debug!(
            target: NAMESPACE,
            severity = %level,
            log_caller = config.log_caller,
            "logging initialized"
        );

        if config.show_banner {
            self.print_banner(level);
        }

        level
    }

    fn configure_backend(&self, config: &EffectiveConfig) -> Result<(), InitializationError> {
        let settings = BackendSettings {
            root: NAMESPACE,
            level: config.severity.to_host_level(),
            format: MessageFormat::new(config.log_caller),
        };
        self.backend.configure(&settings)
    }

    fn print_banner(&self, level: Severity) {
        let version = (self.version)().unwrap_or_else(|e| {
            report(&e);
            UNKNOWN_VERSION.to_string()
        });

        let mut out = self.banner_out.lock();
        if let Err(e) =
            BannerPrinter::default().print(&mut *out, &version, level, self.backend.is_platform_default())
        {
            eprintln!("Warning: failed to print startup banner: {e}");
        }
    }

    /// Logger named after the calling component `T`.
    pub fn logger_for<T: ?Sized>(&self) -> LoggerHandle {
        self.logger_named(simple_type_name::<T>())
    }

    pub fn logger_named(&self, component: &str) -> LoggerHandle {
        self.initialize_once();
        LoggerHandle::new(
            format!("{NAMESPACE}.{component}"),
            Arc::clone(&self.backend),
            Arc::clone(&self.state),
        )
    }

    pub fn is_loggable(&self, candidate: Severity) -> bool {
        self.state.is_loggable(candidate)
    }

    pub fn active_level(&self) -> Severity {
        self.state.active()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PropertiesSource;
    use crate::app::config::{LEVEL_KEY, SHOW_BANNER_KEY};
    use std::fmt::Arguments;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingBackend {
        configured: AtomicUsize,
    }

    impl LogBackend for CountingBackend {
        fn configure(&self, _settings: &BackendSettings) -> Result<(), InitializationError> {
            self.configured.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn log(
            &self,
            _logger: &str,
            _level: Severity,
            _caller: &'static std::panic::Location<'static>,
            _args: Arguments<'_>,
        ) {
        }
    }

    fn quiet_system(source: PropertiesSource, backend: Arc<CountingBackend>) -> LoggingSystem {
        LoggingSystem::new(Box::new(source.with(SHOW_BANNER_KEY, "false")), backend)
    }

    #[test]
    fn test_process_state_defaults_to_info() {
        let state = ProcessState::default();
        assert_eq!(state.active(), Severity::Info);
        assert!(!state.is_initialized());
        assert!(state.is_loggable(Severity::Info));
        assert!(!state.is_loggable(Severity::Debug));
    }

    #[test]
    fn test_is_loggable_is_monotonic() {
        let state = ProcessState::default();

        for active in Severity::VALUES {
            state.record(active);
            for (i, candidate) in Severity::VALUES.iter().enumerate() {
                if state.is_loggable(*candidate) {
                    for higher in &Severity::VALUES[i..] {
                        assert!(state.is_loggable(*higher), "{higher} at active {active}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_is_loggable_always_false_when_off() {
        let state = ProcessState::default();
        state.record(Severity::Off);

        for candidate in Severity::VALUES {
            assert!(!state.is_loggable(candidate));
        }
    }

    #[test]
    fn test_all_lets_everything_through() {
        let state = ProcessState::default();
        state.record(Severity::All);

        for candidate in Severity::VALUES {
            assert!(state.is_loggable(candidate));
        }
    }

    #[test]
    fn test_not_initialized_until_first_touch() {
        let backend = Arc::new(CountingBackend::default());
        let system = quiet_system(PropertiesSource::new().with(LEVEL_KEY, "ERROR"), backend.clone());

        assert!(!system.is_initialized());
        assert_eq!(system.active_level(), Severity::Info);
        assert_eq!(backend.configured.load(Ordering::SeqCst), 0);

        assert_eq!(system.initialize_once(), Severity::Error);
        assert!(system.is_initialized());
        assert_eq!(backend.configured.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_logger_named_triggers_initialization() {
        let backend = Arc::new(CountingBackend::default());
        let system = quiet_system(PropertiesSource::new(), backend.clone());

        let logger = system.logger_named("Scheduler");
        assert_eq!(logger.name(), "dominion.Scheduler");
        assert!(system.is_initialized());

        let _ = system.logger_named("World");
        assert_eq!(backend.configured.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_logging_system_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoggingSystem>();
        assert_send_sync::<LoggerHandle>();
    }
}
