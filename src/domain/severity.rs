use crate::app::InitializationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Severity scale used by callers of the library.
///
/// The declaration order is the total order of the scale and also the index
/// into [`LEVEL_MAPPING`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Severity {
    All,
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Off,
}

/// Host level for each [`Severity`], indexed by ordinal.
///
/// `tracing` has no threshold below `TRACE`, so `All` and `Trace` share it.
pub const LEVEL_MAPPING: [LevelFilter; Severity::COUNT] = [
    LevelFilter::TRACE, // All
    LevelFilter::TRACE, // Trace
    LevelFilter::DEBUG, // Debug
    LevelFilter::INFO,  // Info
    LevelFilter::WARN,  // Warning
    LevelFilter::ERROR, // Error
    LevelFilter::OFF,   // Off
];

const _: () = assert!(
    Severity::Off as usize + 1 == LEVEL_MAPPING.len()
        && Severity::VALUES[LEVEL_MAPPING.len() - 1] as u8 == Severity::Off as u8
        && Severity::All as usize == 0,
    "level mapping out of sync with the severity scale"
);

impl Severity {
    /// Every severity in ordinal order.
    pub const VALUES: [Severity; 7] = [
        Severity::All,
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Off,
    ];

    pub const COUNT: usize = Self::VALUES.len();

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Severity at `ordinal`.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal` is outside the scale. Ordinals only ever come from
    /// [`Severity::ordinal`], so this signals corrupted internal state.
    pub fn from_ordinal(ordinal: u8) -> Self {
        Self::VALUES[usize::from(ordinal)]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::All => "ALL",
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Off => "OFF",
        }
    }

    /// Equivalent threshold on the `tracing` scale.
    pub fn to_host_level(self) -> LevelFilter {
        LEVEL_MAPPING[usize::from(self.ordinal())]
    }

    pub fn valid_names() -> Vec<String> {
        Self::VALUES.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = InitializationError;

    /// Exact, case-sensitive match on the upper-case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VALUES
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| InitializationError::InvalidLogLevel {
                key: None,
                input: s.to_string(),
                valid_levels: Self::valid_names(),
            })
    }
}

impl From<Severity> for LevelFilter {
    fn from(severity: Severity) -> Self {
        severity.to_host_level()
    }
}
