//! Frozen route table with radix-tree dispatch (matchit)
//!
//! A [`RouteTable`] is the build artifact handed to the serving layer. It owns the
//! resolved version map and the emitted entries, and answers "which handler serves
//! `GET /v2/posts/42`?" without any locking:
//!
//! ```rust,ignore
//! let table = Arc::new(registry.freeze(Some("api"))?);
//!
//! match table.match_route(&Method::GET, "/api/v2/posts/42") {
//!     RouteMatch::Found { entry, params } => { /* call entry.handler */ }
//!     RouteMatch::MethodNotAllowed { allowed } => { /* 405 */ }
//!     RouteMatch::NotFound => { /* 404 */ }
//! }
//! ```

use crate::emitter::{self, RouteEntry, RouteMethod, RouteSummary};
use crate::resolver::VersionMap;
use http::Method;
use matchit::Router as MatchitRouter;
use std::collections::HashMap;

/// Error returned when two routes cannot share the dispatch tree
#[derive(Debug, Clone)]
pub struct RouteConflictError {
    /// The path that was being registered
    pub new_path: String,
    /// The HTTP method that conflicts
    pub method: Option<RouteMethod>,
    /// The existing path that conflicts
    pub existing_path: String,
    /// Detailed error message from the underlying router
    pub details: String,
}

impl std::fmt::Display for RouteConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "route conflict detected")?;
        writeln!(f, "  Conflicting routes:")?;
        writeln!(f, "    → Existing: {}", self.existing_path)?;
        writeln!(f, "    → New:      {}", self.new_path)?;
        if let Some(method) = self.method {
            writeln!(f, "  HTTP Method: {}", method.as_http())?;
        }
        writeln!(f, "  Details: {}", self.details)?;
        writeln!(f, "  How to resolve:")?;
        writeln!(
            f,
            "    1. Give the resources distinct paths within each version"
        )?;
        write!(
            f,
            "    2. Avoid parameter segments in resource paths that shadow `:id`"
        )
    }
}

impl std::error::Error for RouteConflictError {}

/// Methods served at one URL template, as indices into the entry list
#[derive(Debug, Clone, Default)]
struct PathRoutes {
    methods: Vec<(RouteMethod, usize)>,
}

impl PathRoutes {
    fn get(&self, method: RouteMethod) -> Option<usize> {
        self.methods
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, index)| *index)
    }

    fn allowed_methods(&self) -> Vec<RouteMethod> {
        self.methods.iter().map(|(m, _)| *m).collect()
    }
}

/// Result of route matching
#[derive(Debug)]
pub enum RouteMatch<'a, H> {
    Found {
        entry: &'a RouteEntry<H>,
        params: HashMap<String, String>,
    },
    NotFound,
    MethodNotAllowed {
        allowed: Vec<RouteMethod>,
    },
}

/// Immutable per-version route table.
///
/// Built once after registration; share it behind an `Arc` across request tasks.
pub struct RouteTable<H> {
    versions: VersionMap<H>,
    entries: Vec<RouteEntry<H>>,
    prefix: Option<String>,
    inner: MatchitRouter<PathRoutes>,
}

impl<H: Clone> RouteTable<H> {
    /// Emit the routes of `versions` and index them for dispatch.
    pub fn new(versions: VersionMap<H>, prefix: Option<&str>) -> Result<Self, RouteConflictError> {
        let prefix = prefix.filter(|p| !p.is_empty()).map(str::to_string);
        let entries = emitter::emit(&versions, prefix.as_deref());

        // Group by template, keeping first-appearance order for stable errors.
        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, PathRoutes> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            let routes = grouped.entry(entry.path.clone()).or_insert_with(|| {
                order.push(entry.path.clone());
                PathRoutes::default()
            });

            if routes.get(entry.method).is_some() {
                return Err(RouteConflictError {
                    new_path: entry.path.clone(),
                    method: Some(entry.method),
                    existing_path: entry.path.clone(),
                    details: format!(
                        "{} is already served by another resource of {}",
                        entry.method.as_http(),
                        entry.version
                    ),
                });
            }
            routes.methods.push((entry.method, index));
        }

        let mut inner = MatchitRouter::new();
        let mut inserted: Vec<&str> = Vec::with_capacity(order.len());

        for path in &order {
            let routes = grouped.remove(path).unwrap_or_default();
            let method = routes.methods.first().map(|(m, _)| *m);

            if let Err(e) = inner.insert(path.clone(), routes) {
                let existing_path = find_conflicting_route(&inserted, path)
                    .unwrap_or("<unknown>")
                    .to_string();

                crate::trace_warn!(path = %path, existing = %existing_path, "route conflict");
                return Err(RouteConflictError {
                    new_path: path.clone(),
                    method,
                    existing_path,
                    details: e.to_string(),
                });
            }
            inserted.push(path);
        }

        crate::trace_info!(
            versions = versions.len(),
            routes = entries.len(),
            "route table frozen"
        );

        Ok(Self {
            versions,
            entries,
            prefix,
            inner,
        })
    }

    /// Routes serving `version`, built or not.
    ///
    /// A version that registered nothing gets the routes of its nearest ancestor
    /// on the predecessor chain, relabeled to `version`.
    pub fn resolve_version(&self, version: &str) -> Vec<RouteEntry<H>> {
        let table = self.versions.table_for(version);
        table
            .bindings()
            .iter()
            .flat_map(|binding| emitter::emit_binding(binding, self.prefix.as_deref()))
            .collect()
    }
}

impl<H> RouteTable<H> {
    /// All entries in emission order
    pub fn entries(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    /// Entries emitted for exactly this version
    pub fn for_version<'a>(
        &'a self,
        version: &'a str,
    ) -> impl Iterator<Item = &'a RouteEntry<H>> + 'a {
        self.entries.iter().filter(move |e| e.version == version)
    }

    /// Built versions in order
    pub fn versions(&self) -> impl Iterator<Item = &str> + '_ {
        self.versions.versions()
    }

    /// The resolved tables behind the entries
    pub fn version_map(&self) -> &VersionMap<H> {
        &self.versions
    }

    /// Prefix the table was built with
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no route was emitted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handler-free listing of every entry
    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.entries.iter().map(RouteEntry::summary).collect()
    }

    /// Log every entry at debug level
    pub fn log_routes(&self) {
        for entry in &self.entries {
            let summary = entry.summary();
            crate::trace_debug!(route = %summary, "route");
        }
    }

    /// Match a request path and method
    pub fn match_route(&self, method: &Method, path: &str) -> RouteMatch<'_, H> {
        match self.inner.at(path) {
            Ok(matched) => {
                let routes = matched.value;
                let index = RouteMethod::from_http(method).and_then(|m| routes.get(m));

                match index.and_then(|i| self.entries.get(i)) {
                    Some(entry) => {
                        let params: HashMap<String, String> = matched
                            .params
                            .iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect();

                        RouteMatch::Found { entry, params }
                    }
                    None => RouteMatch::MethodNotAllowed {
                        allowed: routes.allowed_methods(),
                    },
                }
            }
            Err(_) => RouteMatch::NotFound,
        }
    }
}

impl<H> std::fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("prefix", &self.prefix)
            .field("routes", &self.summaries())
            .finish()
    }
}

/// Find an inserted template that has the same shape as `path`
fn find_conflicting_route<'a>(inserted: &[&'a str], path: &str) -> Option<&'a str> {
    let normalized_new = normalize_path_for_comparison(path);

    inserted
        .iter()
        .copied()
        .find(|existing| normalize_path_for_comparison(existing) == normalized_new)
}

/// Normalize a path for conflict comparison by replacing parameter names with a placeholder
fn normalize_path_for_comparison(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut in_param = false;

    for ch in path.chars() {
        match ch {
            ':' => {
                in_param = true;
                result.push_str(":_");
            }
            '/' => {
                in_param = false;
                result.push('/');
            }
            _ if in_param => {}
            _ => result.push(ch),
        }
    }

    result
}
