//! Binding registry
//!
//! The registry is the explicit replacement for a global route store. Create one at
//! startup, register every controller, then either build the route list or freeze
//! the registry into a [`RouteTable`]:
//!
//! ```rust,ignore
//! let mut registry = Registry::new();
//! let posts = registry.controller("PostController");
//!
//! registry.register_route(
//!     "posts",
//!     "v1",
//!     &posts,
//!     HandlerSlots::new().index(list_posts).show(get_post),
//!     RouteOptions::new(),
//! );
//!
//! let table = registry.freeze(None)?;
//! ```

use crate::binding::{Binding, ControllerRef, HandlerSlots, InjectorRef, RouteOptions};
use crate::config::VersaConfig;
use crate::controller::Controller;
use crate::emitter::{self, RouteEntry};
use crate::resolver::{self, VersionMap};
use crate::table::{RouteConflictError, RouteTable};
use crate::version;

/// Append-only store of controller bindings.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    bindings: Vec<Binding<H>>,
}

impl<H: Clone> Registry<H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Issue a handle identifying a controller
    pub fn controller(&self, name: impl Into<String>) -> ControllerRef {
        ControllerRef::new(name.into())
    }

    /// Issue a handle identifying a user authentication injector
    pub fn injector(&self, name: impl Into<String>) -> InjectorRef {
        InjectorRef::new(name.into())
    }

    /// Register a controller under `path` and `version`.
    ///
    /// A version that is not `v` + positive integer is dropped without error.
    /// Returns whether the binding was kept.
    pub fn register_route(
        &mut self,
        path: impl Into<String>,
        version: impl Into<String>,
        controller: &ControllerRef,
        handlers: HandlerSlots<H>,
        options: RouteOptions,
    ) -> bool {
        let path = path.into();
        let version = version.into();

        if !version::is_valid_version(&version) {
            crate::trace_debug!(
                path = %path,
                version = %version,
                controller = controller.name(),
                "dropping registration with invalid version"
            );
            return false;
        }

        self.bindings.push(Binding {
            version,
            path,
            controller: controller.clone(),
            handlers,
            options,
        });
        true
    }

    /// Register a [`Controller`] implementation, reading its slots from the trait.
    ///
    /// The controller handle is issued here and named after [`Controller::NAME`].
    /// Returns the handle when the binding was kept.
    pub fn register_controller<C: Controller<H>>(
        &mut self,
        path: impl Into<String>,
        version: impl Into<String>,
        controller: &C,
        options: RouteOptions,
    ) -> Option<ControllerRef> {
        let handle = self.controller(C::NAME);
        self.register_route(path, version, &handle, controller.handler_slots(), options)
            .then_some(handle)
    }

    /// Registered bindings in registration order
    pub fn bindings(&self) -> &[Binding<H>] {
        &self.bindings
    }

    /// Number of kept bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing was registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve version inheritance without emitting routes
    pub fn resolve(&self) -> VersionMap<H> {
        resolver::resolve(&self.bindings)
    }

    /// Resolve and emit every route.
    ///
    /// `prefix` is inserted before the version segment: `/prefix/v1/users`.
    /// Calling this repeatedly without new registrations yields the same list.
    pub fn build_routes(&self, prefix: Option<&str>) -> Vec<RouteEntry<H>> {
        let map = self.resolve();
        let routes = emitter::emit(&map, prefix);

        crate::trace_debug!(
            bindings = self.bindings.len(),
            versions = map.len(),
            routes = routes.len(),
            "routes built"
        );
        routes
    }

    /// Consume the registry into an immutable dispatch table.
    pub fn freeze(self, prefix: Option<&str>) -> Result<RouteTable<H>, RouteConflictError> {
        RouteTable::new(self.resolve(), prefix)
    }

    /// Freeze using the prefix from `config`, logging every route when
    /// `config.debug` is set.
    pub fn freeze_with(self, config: &VersaConfig) -> Result<RouteTable<H>, RouteConflictError> {
        let table = self.freeze(config.prefix())?;
        if config.debug {
            table.log_routes();
        }
        Ok(table)
    }
}

impl<H: Clone> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}
