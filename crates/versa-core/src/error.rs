//! Error types for Versa
//!
//! Resolution itself never fails. Errors only come from the edges: parsing a
//! version, building the dispatch table, and loading configuration.

use crate::config::ConfigError;
use crate::table::RouteConflictError;
use crate::version::VersionParseError;
use thiserror::Error;

/// Result type alias for Versa operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error raised by Versa
#[derive(Debug, Error)]
pub enum Error {
    /// A version identifier could not be parsed
    #[error("invalid version: {0}")]
    Version(#[from] VersionParseError),
    /// Two routes could not share the dispatch table
    #[error(transparent)]
    RouteConflict(#[from] RouteConflictError),
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
