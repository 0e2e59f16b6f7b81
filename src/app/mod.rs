pub mod banner;
pub mod config;
pub mod initialization;
pub mod logger;
pub mod logging_system;
pub mod version;

pub use banner::BannerPrinter;
pub use config::{
    ConfigResolver, ConfigSource, EffectiveConfig, EnvSource, LayeredSource, PropertiesSource,
};
pub use initialization::{FallbackStrategy, InitializationError};
pub use logger::LoggerHandle;
pub use logging_system::{LoggingSystem, ProcessState, VersionProvider};
