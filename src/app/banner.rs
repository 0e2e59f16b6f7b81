use super::config::{EnvSource, LEVEL_KEY};
use crate::domain::Severity;
use std::io::{self, Write};

pub const BANNER_MARK: &str = "|) () |\\/| | |\\| | () |\\|";
pub const PANEL_WIDTH: usize = 75;
const VERSION_WIDTH: usize = 25;

/// Startup banner describing the active logging configuration.
#[derive(Debug, Clone, Copy)]
pub struct BannerPrinter {
    width: usize,
}

impl Default for BannerPrinter {
    fn default() -> Self {
        Self::new(PANEL_WIDTH)
    }
}

impl BannerPrinter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Writes the banner. The compatibility panel is only added when the
    /// active backend is the built-in one.
    pub fn print<W: Write + ?Sized>(
        &self,
        out: &mut W,
        version: &str,
        level: Severity,
        backend_is_default: bool,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{BANNER_MARK}")?;
        writeln!(out)?;
        writeln!(out, "{:>width$}", format!("ECS v{version}"), width = VERSION_WIDTH)?;
        writeln!(out)?;

        self.panel(
            out,
            &[
                "Dominion Logging System".to_string(),
                format!("  Logging Level: '{level}'"),
                format!(
                    "  Change the level with the environment variable '{}'.",
                    EnvSource::env_var_name(LEVEL_KEY)
                ),
            ],
        )?;

        if backend_is_default {
            self.panel(
                out,
                &[
                    "  Dominion is compatible with every logging backend that implements".to_string(),
                    "  the 'LogBackend' trait. The built-in backend is 'tracing'.".to_string(),
                ],
            )?;
        }

        writeln!(out)?;
        out.flush()
    }

    fn panel<W: Write + ?Sized>(&self, out: &mut W, rows: &[String]) -> io::Result<()> {
        for row in rows {
            writeln!(out, "| {row:<width$} |", width = self.width)?;
        }
        Ok(())
    }
}
