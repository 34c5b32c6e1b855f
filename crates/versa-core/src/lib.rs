//! # Versa Core
//!
//! Core library resolving versioned controller bindings into route tables.
//!
//! Bindings are registered per version and resource path. When routes are built,
//! each version starts from a copy of its predecessor's resources and overrides
//! the ones it registers again, so `v2` only has to declare what changed.
//!
//! This crate is not meant to be used directly. Use `versa-rs` instead.

#[macro_use]
mod tracing_macros;

mod binding;
pub mod config;
mod controller;
mod emitter;
mod error;
mod middleware;
mod registry;
mod resolver;
mod table;
pub mod version;

// Public API
pub use binding::{Binding, ControllerRef, HandlerSlot, HandlerSlots, InjectorRef, RouteOptions};
pub use config::{ConfigError, Environment, VersaConfig};
pub use controller::Controller;
pub use emitter::{base_path, emit, emit_binding, RouteEntry, RouteMethod, RouteSummary};
pub use error::{Error, Result};
pub use middleware::{MiddlewareLists, MiddlewareMap, MiddlewarePosition};
pub use registry::Registry;
pub use resolver::{resolve, ResolvedTable, VersionMap};
pub use table::{RouteConflictError, RouteMatch, RouteTable};
pub use version::{ApiVersion, VersionParseError};
