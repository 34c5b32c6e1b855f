//! # Versa
//!
//! Versioned route tables for Rust services.
//!
//! Register each controller under a resource path and an API version. When the
//! routes are built, every version inherits the resources of the version before it
//! and overrides only what it registers again.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use versa_rs::prelude::*;
//!
//! type Handler = fn(&Request) -> Response;
//!
//! struct Posts;
//!
//! impl Controller<Handler> for Posts {
//!     const NAME: &'static str = "PostController";
//!     fn index(&self) -> Option<Handler> { Some(list_posts) }
//!     fn show(&self) -> Option<Handler> { Some(get_post) }
//! }
//!
//! fn main() -> versa_rs::Result<()> {
//!     load_dotenv();
//!     let config = VersaConfig::from_env()?;
//!     versa_rs::init_logging(&config);
//!
//!     let mut registry = Registry::new();
//!     registry.register_controller("posts", "v1", &Posts, RouteOptions::new());
//!
//!     // GET /v1/posts, GET /v1/posts/:id
//!     let table = std::sync::Arc::new(registry.freeze_with(&config)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Resolution rules
//!
//! - Versions are `v` followed by a positive integer. Registrations with any other
//!   version are dropped silently.
//! - Versions are ordered lexicographically (`v10` sorts before `v2`).
//! - A version starts from its predecessor's resources when the predecessor has
//!   registrations of its own; otherwise it starts empty.
//! - Registering the same path twice in one version keeps the last registration.
//! - `treat_as_action` drops the `show` route and mounts `put`/`delete` without `:id`.

// Re-export core functionality
pub use versa_core::*;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a fmt subscriber for the current process.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from `VERSA_ENV`, and
/// `config.debug` turns on debug output for the resolver. Calling this again, or
/// after another subscriber was installed, does nothing.
pub fn init_logging(config: &VersaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config, &Environment::current())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn default_filter(config: &VersaConfig, environment: &Environment) -> String {
    let level = environment.default_log_level();
    let core_level = if config.debug { "debug" } else { level };
    format!("{},versa_core={}", level, core_level)
}

/// Prelude module - import everything you need with `use versa_rs::prelude::*`
pub mod prelude {
    pub use versa_core::config::load_dotenv;
    pub use versa_core::{
        ApiVersion, Binding, Controller, ControllerRef, Environment, HandlerSlot, HandlerSlots,
        InjectorRef, MiddlewareLists, MiddlewareMap, MiddlewarePosition, Registry, RouteEntry,
        RouteMatch, RouteMethod, RouteOptions, RouteSummary, RouteTable, VersaConfig,
    };

    pub use http::Method;
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let quiet = VersaConfig::default();
        let loud = VersaConfig {
            debug: true,
            ..VersaConfig::default()
        };

        assert_eq!(
            default_filter(&quiet, &Environment::Production),
            "info,versa_core=info"
        );
        assert_eq!(
            default_filter(&loud, &Environment::Production),
            "info,versa_core=debug"
        );
        assert_eq!(
            default_filter(&quiet, &Environment::Development),
            "debug,versa_core=debug"
        );
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(&VersaConfig::default());
        init_logging(&VersaConfig::default());
    }
}
