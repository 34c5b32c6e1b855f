//! Version inheritance resolver
//!
//! Turns the flat list of bindings into one table per version. A version starts
//! from a copy of its predecessor's table (when the predecessor was built) and then
//! overrides entries path by path:
//!
//! ```text
//! v1: posts, comments          (registered)
//! v2: users                    (registered)
//!
//! v1 => [posts, comments]
//! v2 => [posts, comments, users]   posts/comments copied from v1, relabeled v2
//! ```
//!
//! Bindings are processed sorted by version (lexicographic) and, inside one version,
//! by path in descending order. Equal (version, path) pairs keep registration
//! order, so the last registration for a path wins.

use crate::binding::Binding;
use crate::version::{self, ApiVersion};
use std::borrow::Cow;

/// Winning bindings of one version, in insertion order.
#[derive(Debug, Clone)]
pub struct ResolvedTable<H> {
    version: String,
    bindings: Vec<Binding<H>>,
}

impl<H> ResolvedTable<H> {
    /// An empty table for `version`
    pub fn empty(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            bindings: Vec::new(),
        }
    }

    /// Version this table resolves
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Winning bindings in table order
    pub fn bindings(&self) -> &[Binding<H>] {
        &self.bindings
    }

    /// Binding for a resource path
    pub fn get(&self, path: &str) -> Option<&Binding<H>> {
        self.bindings.iter().find(|b| b.path == path)
    }

    /// Resource paths in table order
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.bindings.iter().map(|b| b.path.as_str())
    }

    /// Number of resource paths
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when the version has no resources
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Replace the binding with the same path in place, or append it.
    pub(crate) fn upsert(&mut self, binding: Binding<H>) {
        match self.bindings.iter().position(|b| b.path == binding.path) {
            Some(index) => self.bindings[index] = binding,
            None => self.bindings.push(binding),
        }
    }
}

impl<H: Clone> ResolvedTable<H> {
    /// Deep copy of this table with every binding relabeled to `version`.
    pub fn relabeled(&self, version: &str) -> Self {
        Self {
            version: version.to_string(),
            bindings: self.bindings.iter().map(|b| b.relabeled(version)).collect(),
        }
    }
}

/// Resolved tables keyed by version, in version order.
#[derive(Debug, Clone)]
pub struct VersionMap<H> {
    tables: Vec<ResolvedTable<H>>,
}

impl<H> VersionMap<H> {
    fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Table built for exactly this version
    pub fn get(&self, version: &str) -> Option<&ResolvedTable<H>> {
        self.tables.iter().find(|t| t.version == version)
    }

    fn get_mut(&mut self, version: &str) -> Option<&mut ResolvedTable<H>> {
        self.tables.iter_mut().find(|t| t.version == version)
    }

    /// Built versions in order
    pub fn versions(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.iter().map(|t| t.version.as_str())
    }

    /// Tables in version order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedTable<H>> + '_ {
        self.tables.iter()
    }

    /// Number of built versions
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when nothing was registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<H: Clone> VersionMap<H> {
    /// Table for any version, including versions that registered nothing.
    ///
    /// A version without its own bindings follows its predecessor chain to the
    /// nearest built version and gets that table relabeled. With nothing on the
    /// chain the result is empty.
    ///
    /// Unlike [`resolve`], the walk skips gaps: with only `v1` built, `table_for("v3")`
    /// inherits `v1`, while a registered `v3` is built from an empty table because
    /// `v2` is missing.
    pub fn table_for(&self, version: &str) -> Cow<'_, ResolvedTable<H>> {
        if let Some(table) = self.get(version) {
            return Cow::Borrowed(table);
        }

        let Ok(target) = version.parse::<ApiVersion>() else {
            return Cow::Owned(ResolvedTable::empty(version));
        };

        // The chain only ever produces canonical `vN` names, so the nearest
        // ancestor is the canonical built version with the largest smaller number.
        let ancestor = self
            .tables
            .iter()
            .filter_map(|t| {
                let v = t.version.parse::<ApiVersion>().ok()?;
                let canonical = v.as_str() == format!("v{}", v.number());
                (canonical && v.number() < target.number()).then_some((v.number(), t))
            })
            .max_by_key(|(number, _)| *number);

        match ancestor {
            Some((_, table)) => Cow::Owned(table.relabeled(version)),
            None => Cow::Owned(ResolvedTable::empty(version)),
        }
    }
}

impl<'a, H> IntoIterator for &'a VersionMap<H> {
    type Item = &'a ResolvedTable<H>;
    type IntoIter = std::slice::Iter<'a, ResolvedTable<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Resolve bindings into per-version tables with predecessor inheritance.
///
/// Never fails: bindings are taken as given, and a version whose predecessor was
/// not built starts from an empty table.
pub fn resolve<H: Clone>(bindings: &[Binding<H>]) -> VersionMap<H> {
    let mut sorted: Vec<&Binding<H>> = bindings.iter().collect();
    sorted.sort_by(|a, b| {
        version::compare(&a.version, &b.version).then_with(|| b.path.cmp(&a.path))
    });

    let mut map = VersionMap::new();

    for binding in sorted {
        if map.get(&binding.version).is_none() {
            let inherited = version::predecessor(&binding.version)
                .and_then(|prev| map.get(&prev).map(|t| t.relabeled(&binding.version)));

            let seed = match inherited {
                Some(table) => {
                    crate::trace_trace!(
                        version = %binding.version,
                        inherited = table.len(),
                        "seeded version from predecessor"
                    );
                    table
                }
                None => ResolvedTable::empty(binding.version.clone()),
            };
            map.tables.push(seed);
        }

        if let Some(table) = map.get_mut(&binding.version) {
            table.upsert(binding.clone());
        }
    }

    map
}
