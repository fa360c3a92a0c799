//! # routier
//!
//! A minimal controller-style routing layer on top of hyper. Handlers are
//! grouped into [`Controller`]s, each member annotated with a verb + path,
//! optional middleware, and optional required body fields; installing a
//! controller turns those annotations into routes on a process-wide
//! [`AppRouter`] the server mounts.
//!
//! ## The shape of an application
//!
//! 1. Describe each handler group as a [`Controller`] and `install()` it.
//! 2. Hand [`AppRouter::instance`] to [`Server::serve`].
//!
//! Registration happens strictly before serving; afterwards the router is
//! read-only and requests flow through it without coordination.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use routier::{AppRouter, Controller, Request, Response, Server, Session, Status};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut auth = Controller::new("/auth");
//!     auth.handle("post_login", post_login)
//!         .post("/login")
//!         .body_fields(["email", "password"]);
//!     auth.install();
//!
//!     Server::bind("0.0.0.0:3000")
//!         .session_secret("change-me")
//!         .serve(AppRouter::instance())
//!         .await
//!         .unwrap();
//! }
//!
//! async fn post_login(req: Request) -> Response {
//!     // the generated body validator already guaranteed both fields
//!     let _body = req.parsed_body().unwrap_or_default();
//!     Response::builder()
//!         .status(Status::Ok)
//!         .header("location", "/")
//!         .session(Session { logged_in: true })
//!         .no_body()
//! }
//! ```
//!
//! A member declared without a verb annotation is not a route — it is
//! silently skipped at install time. Middleware declared with
//! [`Annotate::with`] runs in application order, and every route ends its
//! chain with a generated body validator (a no-op when no fields were
//! declared) before the handler.

mod app_router;
mod controller;
mod error;
mod handler;
mod meta;
mod method;
mod request;
mod response;
mod router;
mod server;
mod session;
mod status;

pub mod controllers;
pub mod middleware;
pub mod pages;

pub use app_router::AppRouter;
pub use controller::{Annotate, Controller};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use middleware::{Flow, Middleware};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use session::Session;
pub use status::Status;
