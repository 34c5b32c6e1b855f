//! Controller trait
//!
//! A controller groups the handlers of one resource. Each provided method fills the
//! matching slot; the defaults leave the slot empty so no route is emitted for it.
//!
//! A newer version of a controller reuses handlers by returning them explicitly,
//! usually by delegating to the older controller:
//!
//! ```rust,ignore
//! struct UsersV2 { v1: UsersV1 }
//!
//! impl Controller<Handler> for UsersV2 {
//!     const NAME: &'static str = "UserController";
//!
//!     fn index(&self) -> Option<Handler> { Some(users_v2_index) }
//!     fn post(&self) -> Option<Handler> { self.v1.post() }
//! }
//! ```

use crate::binding::HandlerSlots;

/// A handler-providing unit registered under a resource path.
pub trait Controller<H> {
    /// Name used for the controller handle and in logs
    const NAME: &'static str;

    /// `GET base`
    fn index(&self) -> Option<H> {
        None
    }

    /// `GET base/:id`
    fn show(&self) -> Option<H> {
        None
    }

    /// `POST base`
    fn post(&self) -> Option<H> {
        None
    }

    /// `PUT base/:id`
    fn put(&self) -> Option<H> {
        None
    }

    /// `DELETE base/:id`
    fn delete(&self) -> Option<H> {
        None
    }

    /// Collect the provided handlers into slots
    fn handler_slots(&self) -> HandlerSlots<H> {
        HandlerSlots {
            index: self.index(),
            show: self.show(),
            post: self.post(),
            put: self.put(),
            delete: self.delete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::HandlerSlot;

    struct Posts;

    impl Controller<&'static str> for Posts {
        const NAME: &'static str = "PostController";

        fn index(&self) -> Option<&'static str> {
            Some("post-index")
        }

        fn delete(&self) -> Option<&'static str> {
            Some("post-delete")
        }
    }

    struct PostsV2 {
        v1: Posts,
    }

    impl Controller<&'static str> for PostsV2 {
        const NAME: &'static str = "PostControllerV2";

        fn index(&self) -> Option<&'static str> {
            Some("post-index-v2")
        }

        fn delete(&self) -> Option<&'static str> {
            self.v1.delete()
        }
    }

    #[test]
    fn test_defaults_leave_slots_empty() {
        let slots = Posts.handler_slots();

        assert_eq!(slots.index, Some("post-index"));
        assert_eq!(slots.show, None);
        assert_eq!(slots.post, None);
        assert_eq!(slots.put, None);
        assert_eq!(slots.delete, Some("post-delete"));
    }

    #[test]
    fn test_composition_reuses_handlers() {
        let slots = PostsV2 { v1: Posts }.handler_slots();

        assert_eq!(slots.get(HandlerSlot::Index), Some(&"post-index-v2"));
        assert_eq!(slots.get(HandlerSlot::Delete), Some(&"post-delete"));
    }
}
