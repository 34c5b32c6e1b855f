//! Route emission
//!
//! Expands each resolved binding into concrete route entries. For
//! `base = /[prefix/]version/path`:
//!
//! | slot     | method | path                                   |
//! |----------|--------|----------------------------------------|
//! | `index`  | GET    | `base`                                 |
//! | `show`   | GET    | `base/:id` (skipped for actions)       |
//! | `post`   | POST   | `base`                                 |
//! | `put`    | PUT    | `base/:id`, or `base` for actions      |
//! | `delete` | DELETE | `base/:id`, or `base` for actions      |

use crate::binding::{Binding, ControllerRef, HandlerSlot, RouteOptions};
use crate::resolver::VersionMap;
use http::Method;
use serde::Serialize;
use std::fmt;

/// HTTP methods the emitter produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RouteMethod {
    /// Lower-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::Get => "get",
            RouteMethod::Post => "post",
            RouteMethod::Put => "put",
            RouteMethod::Delete => "delete",
        }
    }

    /// The equivalent `http::Method`
    pub fn as_http(&self) -> Method {
        match self {
            RouteMethod::Get => Method::GET,
            RouteMethod::Post => Method::POST,
            RouteMethod::Put => Method::PUT,
            RouteMethod::Delete => Method::DELETE,
        }
    }

    /// The route method for an `http::Method`, if the emitter produces it
    pub fn from_http(method: &Method) -> Option<Self> {
        if *method == Method::GET {
            Some(RouteMethod::Get)
        } else if *method == Method::POST {
            Some(RouteMethod::Post)
        } else if *method == Method::PUT {
            Some(RouteMethod::Put)
        } else if *method == Method::DELETE {
            Some(RouteMethod::Delete)
        } else {
            None
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RouteMethod> for Method {
    fn from(method: RouteMethod) -> Self {
        method.as_http()
    }
}

/// One emitted route, ready for HTTP dispatch.
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    /// HTTP method
    pub method: RouteMethod,
    /// URL template, e.g. `/v1/users/:id`
    pub path: String,
    /// Version the entry was emitted for
    pub version: String,
    /// Slot that produced the entry
    pub slot: HandlerSlot,
    /// Controller identity from the binding
    pub controller: ControllerRef,
    /// Handler from the binding
    pub handler: H,
    /// Options from the binding
    pub options: RouteOptions,
}

impl<H> RouteEntry<H> {
    /// Handler-free view of this entry
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            method: self.method,
            path: self.path.clone(),
            version: self.version.clone(),
            controller: self.controller.name().to_string(),
            slot: self.slot,
            treat_as_action: self.options.treat_as_action,
            user_auth: self
                .options
                .user_auth_injector
                .as_ref()
                .map(|i| i.name().to_string()),
        }
    }
}

/// Serializable description of a route, without the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub method: RouteMethod,
    pub path: String,
    pub version: String,
    pub controller: String,
    pub slot: HandlerSlot,
    pub treat_as_action: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_auth: Option<String>,
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} {} -> {}.{}",
            self.method.as_str().to_uppercase(),
            self.path,
            self.controller,
            self.slot
        )
    }
}

/// Base path of a binding: `/[prefix/]version/path`.
///
/// The prefix is used as given; an empty prefix counts as absent.
pub fn base_path(prefix: Option<&str>, version: &str, path: &str) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("/{}/{}/{}", prefix, version, path),
        None => format!("/{}/{}", version, path),
    }
}

/// Emit the routes of one binding, in slot order.
pub fn emit_binding<H: Clone>(binding: &Binding<H>, prefix: Option<&str>) -> Vec<RouteEntry<H>> {
    let base = base_path(prefix, &binding.version, &binding.path);
    let action = binding.options.treat_as_action;
    let member = format!("{}/:id", base);

    binding
        .handlers
        .present()
        .filter_map(|(slot, handler)| {
            let (method, path) = match slot {
                HandlerSlot::Index => (RouteMethod::Get, &base),
                HandlerSlot::Show if action => return None,
                HandlerSlot::Show => (RouteMethod::Get, &member),
                HandlerSlot::Post => (RouteMethod::Post, &base),
                HandlerSlot::Put => (RouteMethod::Put, if action { &base } else { &member }),
                HandlerSlot::Delete => {
                    (RouteMethod::Delete, if action { &base } else { &member })
                }
            };

            Some(RouteEntry {
                method,
                path: path.clone(),
                version: binding.version.clone(),
                slot,
                controller: binding.controller.clone(),
                handler: handler.clone(),
                options: binding.options.clone(),
            })
        })
        .collect()
}

/// Emit every route of a resolved version map.
///
/// Versions in map order, bindings in table order, slots in fixed order.
pub fn emit<H: Clone>(map: &VersionMap<H>, prefix: Option<&str>) -> Vec<RouteEntry<H>> {
    map.iter()
        .flat_map(|table| table.bindings().iter())
        .flat_map(|binding| emit_binding(binding, prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{HandlerSlots, InjectorRef};

    fn binding(
        options: RouteOptions,
        handlers: HandlerSlots<&'static str>,
    ) -> Binding<&'static str> {
        Binding {
            version: "v1".to_string(),
            path: "posts".to_string(),
            controller: ControllerRef::new("PostController"),
            handlers,
            options,
        }
    }

    fn all_slots() -> HandlerSlots<&'static str> {
        HandlerSlots::new()
            .index("index")
            .show("show")
            .post("post")
            .put("put")
            .delete("delete")
    }

    fn shape<H>(routes: &[RouteEntry<H>]) -> Vec<(RouteMethod, &str)> {
        routes.iter().map(|r| (r.method, r.path.as_str())).collect()
    }

    #[test]
    fn test_rest_style_routes() {
        let routes = emit_binding(&binding(RouteOptions::new(), all_slots()), None);

        assert_eq!(
            shape(&routes),
            vec![
                (RouteMethod::Get, "/v1/posts"),
                (RouteMethod::Get, "/v1/posts/:id"),
                (RouteMethod::Post, "/v1/posts"),
                (RouteMethod::Put, "/v1/posts/:id"),
                (RouteMethod::Delete, "/v1/posts/:id"),
            ]
        );
        let handlers: Vec<_> = routes.iter().map(|r| r.handler).collect();
        assert_eq!(handlers, vec!["index", "show", "post", "put", "delete"]);
    }

    #[test]
    fn test_action_style_routes() {
        let routes = emit_binding(
            &binding(RouteOptions::new().treat_as_action(), all_slots()),
            None,
        );

        assert_eq!(
            shape(&routes),
            vec![
                (RouteMethod::Get, "/v1/posts"),
                (RouteMethod::Post, "/v1/posts"),
                (RouteMethod::Put, "/v1/posts"),
                (RouteMethod::Delete, "/v1/posts"),
            ]
        );
        assert!(routes.iter().all(|r| r.slot != HandlerSlot::Show));
    }

    #[test]
    fn test_show_and_put_under_action_toggle() {
        let slots = HandlerSlots::new().show("show").put("put");

        let action_options = RouteOptions::new().treat_as_action();
        let action = emit_binding(&binding(action_options, slots.clone()), None);
        assert_eq!(shape(&action), vec![(RouteMethod::Put, "/v1/posts")]);

        let rest = emit_binding(&binding(RouteOptions::new(), slots), None);
        assert_eq!(
            shape(&rest),
            vec![
                (RouteMethod::Get, "/v1/posts/:id"),
                (RouteMethod::Put, "/v1/posts/:id"),
            ]
        );
    }

    #[test]
    fn test_absent_slots_emit_nothing() {
        let routes = emit_binding(&binding(RouteOptions::new(), HandlerSlots::new()), None);
        assert!(routes.is_empty());
    }

    #[test]
    fn test_prefix() {
        assert_eq!(base_path(Some("api"), "v2", "users"), "/api/v2/users");
        assert_eq!(base_path(Some("api/internal"), "v1", "x"), "/api/internal/v1/x");
        assert_eq!(base_path(Some(""), "v1", "x"), "/v1/x");
        assert_eq!(base_path(None, "v1", "x"), "/v1/x");
    }

    #[test]
    fn test_options_carried_through() {
        let auth = InjectorRef::new("JwtAuth");
        let options = RouteOptions::new().with_user_auth(auth.clone());
        let routes = emit_binding(&binding(options, HandlerSlots::new().index("index")), None);

        assert_eq!(routes[0].options.user_auth_injector, Some(auth));
        assert_eq!(routes[0].controller.name(), "PostController");
    }

    #[test]
    fn test_summary_serialization() {
        let show_only = binding(RouteOptions::new(), HandlerSlots::new().show("s"));
        let routes = emit_binding(&show_only, Some("api"));
        let summary = routes[0].summary();

        assert_eq!(summary.to_string(), "GET    /api/v1/posts/:id -> PostController.show");
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({
                "method": "get",
                "path": "/api/v1/posts/:id",
                "version": "v1",
                "controller": "PostController",
                "slot": "show",
                "treat_as_action": false,
            })
        );
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(Method::from(RouteMethod::Delete), Method::DELETE);
        assert_eq!(RouteMethod::from_http(&Method::PUT), Some(RouteMethod::Put));
        assert_eq!(RouteMethod::from_http(&Method::GET), Some(RouteMethod::Get));
        assert_eq!(RouteMethod::from_http(&Method::PATCH), None);
        assert_eq!(RouteMethod::from_http(&Method::HEAD), None);
    }
}
