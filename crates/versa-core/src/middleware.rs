//! Per-handler middleware lists
//!
//! Middleware is attached to a controller method by name and split into the
//! functions that run before the handler and the ones that run after it. The map
//! only stores the lists; running them is up to the serving layer.

use crate::binding::ControllerRef;
use crate::emitter::RouteEntry;
use std::collections::HashMap;

/// Where a middleware list runs relative to the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MiddlewarePosition {
    #[default]
    Before,
    After,
}

/// Middleware attached to one controller method
#[derive(Debug, Clone)]
pub struct MiddlewareLists<M> {
    pub before: Vec<M>,
    pub after: Vec<M>,
}

impl<M> MiddlewareLists<M> {
    fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// List for a position
    pub fn at(&self, position: MiddlewarePosition) -> &[M] {
        match position {
            MiddlewarePosition::Before => &self.before,
            MiddlewarePosition::After => &self.after,
        }
    }
}

impl<M> Default for MiddlewareLists<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware lists keyed by (controller, method name).
#[derive(Debug, Clone)]
pub struct MiddlewareMap<M> {
    entries: HashMap<(ControllerRef, String), MiddlewareLists<M>>,
}

impl<M> MiddlewareMap<M> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Set the list for one position of a controller method.
    ///
    /// Setting the same position again replaces the previous list; the other
    /// position is left alone.
    pub fn set(
        &mut self,
        controller: &ControllerRef,
        method: impl Into<String>,
        funcs: Vec<M>,
        position: MiddlewarePosition,
    ) {
        let method = method.into();
        crate::trace_debug!(
            controller = controller.name(),
            method = %method,
            position = ?position,
            count = funcs.len(),
            "middleware registered"
        );

        let lists = self
            .entries
            .entry((controller.clone(), method))
            .or_default();
        match position {
            MiddlewarePosition::Before => lists.before = funcs,
            MiddlewarePosition::After => lists.after = funcs,
        }
    }

    /// Shorthand for [`set`](Self::set) with [`MiddlewarePosition::Before`]
    pub fn before(&mut self, controller: &ControllerRef, method: impl Into<String>, funcs: Vec<M>) {
        self.set(controller, method, funcs, MiddlewarePosition::Before);
    }

    /// Shorthand for [`set`](Self::set) with [`MiddlewarePosition::After`]
    pub fn after(&mut self, controller: &ControllerRef, method: impl Into<String>, funcs: Vec<M>) {
        self.set(controller, method, funcs, MiddlewarePosition::After);
    }

    /// Lists for a controller method
    pub fn get(&self, controller: &ControllerRef, method: &str) -> Option<&MiddlewareLists<M>> {
        self.entries.get(&(controller.clone(), method.to_string()))
    }

    /// Lists that apply to an emitted route
    pub fn for_route<H>(&self, route: &RouteEntry<H>) -> Option<&MiddlewareLists<M>> {
        self.get(&route.controller, route.slot.as_str())
    }

    /// Number of controller methods with middleware
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no middleware was registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for MiddlewareMap<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_before_is_default_position() {
        assert_eq!(MiddlewarePosition::default(), MiddlewarePosition::Before);
    }

    #[test]
    fn test_set_replaces_per_position() {
        let users = ControllerRef::new("UserController");
        let mut map = MiddlewareMap::new();

        map.before(&users, "index", vec!["auth", "audit"]);
        map.after(&users, "index", vec!["metrics"]);
        map.before(&users, "index", vec!["rate_limit"]);

        let lists = map.get(&users, "index").unwrap();
        assert_eq!(lists.before, vec!["rate_limit"]);
        assert_eq!(lists.after, vec!["metrics"]);
        assert_eq!(lists.at(MiddlewarePosition::After), &["metrics"]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_keyed_by_controller_identity() {
        let v1 = ControllerRef::new("UserController");
        let v2 = ControllerRef::new("UserController");
        let mut map = MiddlewareMap::new();

        map.before(&v1, "show", vec![1]);

        assert!(map.get(&v1, "show").is_some());
        assert!(map.get(&v2, "show").is_none());
        assert!(map.get(&v1, "index").is_none());
    }
}
