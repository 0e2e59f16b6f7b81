// Shared test doubles for the integration tests
#![allow(dead_code)]

use dominion_logging::{BackendSettings, InitializationError, LogBackend, Severity};
use parking_lot::Mutex;
use std::fmt::Arguments;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Backend that records every configuration and message.
#[derive(Default)]
pub struct RecordingBackend {
    pub handlers: Mutex<Vec<BackendSettings>>,
    pub messages: Mutex<Vec<(String, Severity, String)>>,
    pub fail_configure: bool,
    pub platform_default: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_configure: true,
            ..Self::default()
        }
    }

    pub fn platform_default() -> Self {
        Self {
            platform_default: true,
            ..Self::default()
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl LogBackend for RecordingBackend {
    fn configure(&self, settings: &BackendSettings) -> Result<(), InitializationError> {
        if self.fail_configure {
            return Err(InitializationError::BackendInitFailed {
                details: "recording backend refused configuration".to_string(),
                source: Box::new(io::Error::other("refused")),
            });
        }
        self.handlers.lock().push(settings.clone());
        Ok(())
    }

    fn log(
        &self,
        logger: &str,
        level: Severity,
        caller: &'static Location<'static>,
        args: Arguments<'_>,
    ) {
        let format = self
            .handlers
            .lock()
            .first()
            .map(|settings| settings.format)
            .unwrap_or_default();
        self.messages
            .lock()
            .push((logger.to_string(), level, format.render(logger, caller, args)));
    }

    fn is_platform_default(&self) -> bool {
        self.platform_default
    }
}

/// Cloneable in-memory writer standing in for stdout.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn banner_count(&self) -> usize {
        self.contents().matches("Dominion Logging System").count()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
