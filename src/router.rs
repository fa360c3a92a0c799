//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. Each
//! registered route is an [`Endpoint`]: the middleware chain recorded at
//! registration time plus the final handler. The router is populated once,
//! before the server starts accepting connections, and only read afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, ErasedHandler as _, Handler};
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, ErasedMiddleware as _, Flow};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// A registered route: middleware chain first, handler last.
pub(crate) struct Endpoint {
    chain: Vec<BoxedMiddleware>,
    handler: BoxedHandler,
}

impl Endpoint {
    pub(crate) fn new(chain: Vec<BoxedMiddleware>, handler: BoxedHandler) -> Self {
        Self { chain, handler }
    }

    /// Runs the chain in order. Any stage may halt with its own response, in
    /// which case the remaining stages and the handler never run.
    pub(crate) async fn run(&self, mut req: Request) -> Response {
        for middleware in &self.chain {
            match middleware.call(req).await {
                Flow::Next(next) => req = next,
                Flow::Halt(resp) => return resp,
            }
        }
        self.handler.call(req).await
    }
}

/// The application router.
///
/// Usually populated through [`Controller`](crate::Controller) installs
/// against the shared [`AppRouter`](crate::AppRouter) instance; [`Router::on`]
/// registers a bare route with no middleware.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Arc<Endpoint>>>,
    len: usize,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), len: 0 }
    }

    /// Registers a middleware-free handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    pub fn on(&mut self, method: Method, path: &str, handler: impl Handler) {
        self.endpoint(method, path, Endpoint::new(Vec::new(), handler.into_boxed_handler()));
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn endpoint(&mut self, method: Method, path: &str, endpoint: Endpoint) {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, Arc::new(endpoint))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self.len += 1;
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(Arc<Endpoint>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let endpoint = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((endpoint, params))
    }

    /// Full in-process dispatch: lookup, param binding, chain, handler.
    pub(crate) async fn handle(&self, mut req: Request) -> Response {
        let found = self.lookup(req.method(), req.path());
        match found {
            Some((endpoint, params)) => {
                req.set_params(params);
                endpoint.run(req).await
            }
            None => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use bytes::Bytes;

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path.to_owned(), Vec::new(), Bytes::new(), Session::default())
    }

    async fn hello(_req: Request) -> Response {
        Response::text("hello")
    }

    async fn echo_param(req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    #[tokio::test]
    async fn routes_by_method_and_path() {
        let mut router = Router::new();
        router.on(Method::Get, "/hello", hello);

        let resp = router.handle(request(Method::Get, "/hello")).await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"hello");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let mut router = Router::new();
        router.on(Method::Get, "/hello", hello);

        assert_eq!(router.handle(request(Method::Get, "/nope")).await.status, 404);
        assert_eq!(router.handle(request(Method::Post, "/hello")).await.status, 404);
    }

    #[tokio::test]
    async fn binds_path_params() {
        let mut router = Router::new();
        router.on(Method::Get, "/users/{id}", echo_param);

        let resp = router.handle(request(Method::Get, "/users/42")).await;
        assert_eq!(resp.body, b"42");
    }

    #[test]
    fn tracks_registration_count() {
        let mut router = Router::new();
        assert!(router.is_empty());
        router.on(Method::Get, "/a", hello);
        router.on(Method::Post, "/a", hello);
        assert_eq!(router.len(), 2);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_registration_panics() {
        let mut router = Router::new();
        router.on(Method::Get, "/a", hello);
        router.on(Method::Get, "/a", hello);
    }
}
