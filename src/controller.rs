//! Controller groups and the route registration driver.
//!
//! A [`Controller`] describes a group of handlers sharing a path prefix.
//! Declaring a member returns an [`Annotate`] proxy which records that
//! member's metadata — verb + path, middlewares, required body fields — and
//! [`Controller::install`] turns the recorded metadata into real routes on
//! the shared [`AppRouter`](crate::AppRouter):
//!
//! ```rust
//! use routier::{Controller, Request, Response, Status};
//!
//! async fn get_login(_req: Request) -> Response {
//!     Response::html("<form method=\"POST\">…</form>")
//! }
//!
//! async fn post_login(_req: Request) -> Response {
//!     Response::status(Status::Ok)
//! }
//!
//! let mut auth = Controller::new("/auth");
//! auth.handle("get_login", get_login).get("/login");
//! auth.handle("post_login", post_login)
//!     .post("/login")
//!     .body_fields(["email", "password"]);
//! auth.install();
//! # routier::AppRouter::reset();
//! ```
//!
//! A member with no verb annotation is not a route: it is skipped silently at
//! install time. That is a policy, not an error — declaring middleware or
//! body fields on a routeless member simply has no effect.

use tracing::debug;

use crate::app_router::AppRouter;
use crate::handler::{BoxedHandler, Handler};
use crate::meta::{MetaStore, RouteMeta};
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, Middleware, validate::body_validator};
use crate::router::{Endpoint, Router};

/// A group of handlers registered together under one path prefix.
///
/// The prefix may be empty. Full route paths are the exact concatenation
/// `prefix + path` — no slash normalization of any kind.
pub struct Controller {
    prefix: String,
    members: Vec<(&'static str, BoxedHandler)>,
    store: MetaStore,
}

impl Controller {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            members: Vec::new(),
            store: MetaStore::default(),
        }
    }

    /// Declares a handler member and returns its annotation proxy.
    pub fn handle(&mut self, member: &'static str, handler: impl Handler) -> Annotate<'_> {
        self.members.push((member, handler.into_boxed_handler()));
        Annotate { meta: self.store.entry(member) }
    }

    /// Registers every routable member on the shared application router.
    ///
    /// Must run before the server starts serving; registration afterwards is
    /// unsupported.
    ///
    /// # Panics
    ///
    /// Panics if a route path is malformed or already registered.
    pub fn install(self) {
        let shared = AppRouter::instance();
        let mut router = shared.write().expect("app router lock poisoned");
        self.install_into(&mut router);
    }

    /// The registration algorithm, against an explicit router.
    ///
    /// Members are visited in declaration order. A member missing either verb
    /// or path metadata is not a route and is skipped. For each route the
    /// middleware chain is the declared middlewares in recorded order with the
    /// generated body validator appended last, in front of the handler.
    pub fn install_into(self, router: &mut Router) {
        let Self { prefix, members, store } = self;

        for (member, handler) in members {
            let Some(meta) = store.get(member) else { continue };
            let (Some(verb), Some(path)) = (meta.verb, meta.path.as_deref()) else {
                debug!(member, "no verb/path metadata, skipping non-route member");
                continue;
            };

            let full_path = format!("{prefix}{path}");
            let mut chain: Vec<BoxedMiddleware> = meta.middlewares.clone();
            chain.push(body_validator(meta.body_fields.clone()).into_boxed_middleware());

            router.endpoint(verb, &full_path, Endpoint::new(chain, handler));
        }
    }
}

/// Annotation proxy for one controller member.
///
/// Each verb method records the member's verb + literal path (at most one
/// pair; last write wins). [`with`](Annotate::with) appends a middleware —
/// first applied runs first. [`body_fields`](Annotate::body_fields) lowercases
/// the given names and replaces any previously recorded list.
pub struct Annotate<'c> {
    meta: &'c mut RouteMeta,
}

impl Annotate<'_> {
    pub fn get(self, path: &str) -> Self {
        self.verb(Method::Get, path)
    }

    pub fn post(self, path: &str) -> Self {
        self.verb(Method::Post, path)
    }

    pub fn put(self, path: &str) -> Self {
        self.verb(Method::Put, path)
    }

    pub fn patch(self, path: &str) -> Self {
        self.verb(Method::Patch, path)
    }

    pub fn delete(self, path: &str) -> Self {
        self.verb(Method::Delete, path)
    }

    /// Appends a middleware to this member's chain.
    pub fn with(self, middleware: impl Middleware) -> Self {
        self.meta.push_middleware(middleware.into_boxed_middleware());
        self
    }

    /// Declares the body fields the generated validator must find truthy.
    pub fn body_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.meta.set_body_fields(fields);
        self
    }

    fn verb(self, verb: Method, path: &str) -> Self {
        self.meta.set_route(verb, path);
        self
    }
}
