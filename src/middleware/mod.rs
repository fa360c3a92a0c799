//! Middleware layer.
//!
//! Middleware runs before a route's handler and either passes the request to
//! the next stage of the chain or halts with a response of its own. Chains are
//! declared per handler on a [`Controller`](crate::Controller) and run in
//! declaration order, with the generated body validator always last before
//! the handler.
//!
//! Writing middleware is the same as writing a handler, except the return
//! type is [`Flow`]:
//!
//! ```rust
//! use routier::{Flow, Request, Response, Status};
//!
//! async fn require_json(req: Request) -> Flow {
//!     match req.header("content-type") {
//!         Some(ct) if ct.starts_with("application/json") => Flow::Next(req),
//!         _ => Flow::Halt(Response::status(Status::BadRequest)),
//!     }
//! }
//! ```
//!
//! Built-ins: [`require_auth`] (session guard) and [`body_validator`]
//! (required-field check).

pub mod auth;
pub mod validate;

pub use auth::require_auth;
pub use validate::body_validator;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// The outcome of one middleware invocation.
pub enum Flow {
    /// Pass the (possibly modified) request to the next stage.
    Next(Request),
    /// Stop here; the downstream stages never run.
    Halt(Response),
}

pub(crate) type BoxFlowFuture = Pin<Box<dyn Future<Output = Flow> + Send + 'static>>;

/// Internal dispatch interface, mirroring
/// [`ErasedHandler`](crate::handler::ErasedHandler).
#[doc(hidden)]
pub trait ErasedMiddleware {
    fn call(&self, req: Request) -> BoxFlowFuture;
}

/// A heap-allocated, type-erased middleware shared across concurrent requests.
#[doc(hidden)]
pub type BoxedMiddleware = Arc<dyn ErasedMiddleware + Send + Sync + 'static>;

/// Implemented for every valid middleware.
///
/// Automatically satisfied for any `async fn(Request) -> Flow`; sealed, never
/// implemented by hand.
pub trait Middleware: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_middleware(self) -> BoxedMiddleware;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Flow> + Send + 'static,
{
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Flow> + Send + 'static,
{
    fn into_boxed_middleware(self) -> BoxedMiddleware {
        Arc::new(FnMiddleware(self))
    }
}

struct FnMiddleware<F>(F);

impl<F, Fut> ErasedMiddleware for FnMiddleware<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Flow> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFlowFuture {
        Box::pin((self.0)(req))
    }
}
