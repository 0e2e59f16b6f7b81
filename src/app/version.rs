//! Packaged build-info resource.
//!
//! `build.rs` writes `build-info.toml` into `OUT_DIR`; it is embedded here and
//! read once at startup for the banner's version line.

use super::initialization::InitializationError;
use serde::Deserialize;

pub const BUILD_INFO_RESOURCE: &str = "build-info.toml";
pub const REVISION_KEY: &str = "revision";
/// Shown in the banner when the revision cannot be read.
pub const UNKNOWN_VERSION: &str = "unknown";

const BUILD_INFO: &str = include_str!(concat!(env!("OUT_DIR"), "/build-info.toml"));

#[derive(Debug, Deserialize)]
struct BuildInfo {
    revision: Option<String>,
}

/// Revision recorded in the packaged build-info resource.
pub fn fetch_revision() -> Result<String, InitializationError> {
    parse_revision(BUILD_INFO)
}

pub fn parse_revision(document: &str) -> Result<String, InitializationError> {
    let info: BuildInfo =
        toml::from_str(document).map_err(|e| InitializationError::ResourceUnavailable {
            resource: BUILD_INFO_RESOURCE.to_string(),
            details: e.to_string(),
        })?;

    info.revision
        .filter(|revision| !revision.trim().is_empty())
        .ok_or_else(|| InitializationError::ResourceUnavailable {
            resource: BUILD_INFO_RESOURCE.to_string(),
            details: format!("missing '{REVISION_KEY}' entry"),
        })
}
