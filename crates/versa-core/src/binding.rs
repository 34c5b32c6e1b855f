//! Controller bindings
//!
//! A [`Binding`] is one registration of a controller under a resource path and an
//! API version. The registry owns the bindings; the resolver only clones them.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

fn next_handle_id() -> u64 {
    NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Opaque identity of a handler-providing unit.
///
/// Two refs are equal only if they come from the same
/// [`Registry::controller`](crate::Registry::controller) call. Clones share identity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    id: u64,
    name: Arc<str>,
}

impl ControllerRef {
    pub(crate) fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: next_handle_id(),
            name: name.into(),
        }
    }

    /// Display name given at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process-unique identity
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControllerRef({}#{})", self.name, self.id)
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for ControllerRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Opaque reference to a user authentication injector.
///
/// The resolver carries it through to the route entries untouched; enforcing
/// authentication is the serving layer's job.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InjectorRef {
    id: u64,
    name: Arc<str>,
}

impl InjectorRef {
    pub(crate) fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: next_handle_id(),
            name: name.into(),
        }
    }

    /// Display name given at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process-unique identity
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for InjectorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InjectorRef({}#{})", self.name, self.id)
    }
}

/// Per-registration options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    /// Treat the resource as an action: no `show` route, and `put`/`delete`
    /// are mounted on the collection path without `:id`.
    pub treat_as_action: bool,
    /// Authenticator attached to every route of this binding
    pub user_auth_injector: Option<InjectorRef>,
}

impl RouteOptions {
    /// Default options: REST style, no authenticator
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to action style
    pub fn treat_as_action(mut self) -> Self {
        self.treat_as_action = true;
        self
    }

    /// Attach a user authentication injector
    pub fn with_user_auth(mut self, injector: InjectorRef) -> Self {
        self.user_auth_injector = Some(injector);
        self
    }
}

/// The five handler slots a controller can fill, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerSlot {
    Index,
    Show,
    Post,
    Put,
    Delete,
}

impl HandlerSlot {
    /// All slots in the order routes are emitted for one binding
    pub const ALL: [HandlerSlot; 5] = [
        HandlerSlot::Index,
        HandlerSlot::Show,
        HandlerSlot::Post,
        HandlerSlot::Put,
        HandlerSlot::Delete,
    ];

    /// Controller method name backing this slot
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerSlot::Index => "index",
            HandlerSlot::Show => "show",
            HandlerSlot::Post => "post",
            HandlerSlot::Put => "put",
            HandlerSlot::Delete => "delete",
        }
    }
}

impl fmt::Display for HandlerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handlers provided by a controller, one optional value per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSlots<H> {
    pub index: Option<H>,
    pub show: Option<H>,
    pub post: Option<H>,
    pub put: Option<H>,
    pub delete: Option<H>,
}

impl<H> HandlerSlots<H> {
    /// No handlers at all
    pub fn new() -> Self {
        Self {
            index: None,
            show: None,
            post: None,
            put: None,
            delete: None,
        }
    }

    /// Set the `index` handler
    pub fn index(mut self, handler: H) -> Self {
        self.index = Some(handler);
        self
    }

    /// Set the `show` handler
    pub fn show(mut self, handler: H) -> Self {
        self.show = Some(handler);
        self
    }

    /// Set the `post` handler
    pub fn post(mut self, handler: H) -> Self {
        self.post = Some(handler);
        self
    }

    /// Set the `put` handler
    pub fn put(mut self, handler: H) -> Self {
        self.put = Some(handler);
        self
    }

    /// Set the `delete` handler
    pub fn delete(mut self, handler: H) -> Self {
        self.delete = Some(handler);
        self
    }

    /// Handler in the given slot, if present
    pub fn get(&self, slot: HandlerSlot) -> Option<&H> {
        match slot {
            HandlerSlot::Index => self.index.as_ref(),
            HandlerSlot::Show => self.show.as_ref(),
            HandlerSlot::Post => self.post.as_ref(),
            HandlerSlot::Put => self.put.as_ref(),
            HandlerSlot::Delete => self.delete.as_ref(),
        }
    }

    /// Present slots with their handlers, in emission order
    pub fn present(&self) -> impl Iterator<Item = (HandlerSlot, &H)> + '_ {
        HandlerSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|h| (slot, h)))
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.present().count()
    }

    /// True when no slot is filled
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H> Default for HandlerSlots<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// One controller registered under a version and a resource path.
#[derive(Debug, Clone)]
pub struct Binding<H> {
    /// Version identifier, e.g. `"v1"`
    pub version: String,
    /// Resource path segment, e.g. `"users"`
    pub path: String,
    /// Identity of the registering controller
    pub controller: ControllerRef,
    /// Handlers by slot
    pub handlers: HandlerSlots<H>,
    /// Registration options
    pub options: RouteOptions,
}

impl<H: Clone> Binding<H> {
    /// Copy of this binding under another version.
    pub(crate) fn relabeled(&self, version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..self.clone()
        }
    }
}
