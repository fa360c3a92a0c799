//! HTTP server and graceful shutdown.
//!
//! The serve loop accepts connections until the first shutdown signal
//! (SIGTERM or Ctrl-C), then stops accepting and drains every in-flight
//! connection before returning.
//!
//! The server owns the edges of a request's life: it parses the wire request,
//! verifies and decodes the session cookie, dispatches through the shared
//! router, and applies the response's session directive as a `set-cookie`
//! header. Route registration must be finished before [`Server::serve`] is
//! called — the router is only ever read from here.

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use http_body_util::BodyExt;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::session::{self, SessionUpdate};
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    session_secret: Vec<u8>,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use routier::Server;
    /// let server = Server::bind("0.0.0.0:3000").session_secret("change-me");
    /// ```
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr, session_secret: Vec::new() }
    }

    /// Key used to sign and verify session cookies. Defaults to empty, which
    /// still signs consistently — set a real secret for anything non-local.
    pub fn session_secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.session_secret = secret.as_ref().to_vec();
        self
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: Arc<RwLock<Router>>) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let secret = Arc::new(self.session_secret);

        info!(addr = %self.addr, "routier listening");

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` makes select! check arms top-to-bottom. Shutdown is
                // checked first so a SIGTERM immediately stops accepting new
                // connections, even if more are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let secret = Arc::clone(&secret);
                    // TokioIo adapts tokio's AsyncRead/AsyncWrite to the hyper
                    // IO traits.
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // The closure is called once per request on the
                        // connection, not once per connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            let secret = Arc::clone(&secret);
                            async move { dispatch(router, secret, req).await }
                        });

                        // `auto::Builder` transparently handles both HTTP/1.1
                        // and HTTP/2 — whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection to finish before we return.
        while tasks.join_next().await.is_some() {}

        info!("routier stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Core hot path: routes one request and produces one response.
///
/// The error type is [`Infallible`](std::convert::Infallible) — all failures
/// are handled internally (404, 405, 422, …) so hyper never sees an error.
async fn dispatch(
    router: Arc<RwLock<Router>>,
    secret: Arc<Vec<u8>>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible> {
    let (parts, body) = req.into_parts();

    // Verbs outside the closed routable set never reach a lookup.
    let Ok(method) = parts.method.as_str().parse::<Method>() else {
        return Ok(Response::status(Status::MethodNotAllowed).into_http());
    };

    let path = parts.uri.path().to_owned();
    let headers: Vec<(String, String)> = parts
        .headers
        .iter()
        .map(|(k, v)| (k.as_str().to_owned(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!("body read error: {e}");
            return Ok(Response::status(Status::BadRequest).into_http());
        }
    };

    let cookie = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("cookie"))
        .map(|(_, v)| v.as_str());
    let session = session::decode(&secret, cookie);

    let request = Request::new(method, path, headers, body, session);

    // The read lock only covers the lookup — the endpoint runs after the
    // guard is dropped, so slow handlers never hold the router.
    let found = {
        let router = router.read().expect("app router lock poisoned");
        router.lookup(method, request.path())
    };

    let mut response = match found {
        Some((endpoint, params)) => {
            let mut request = request;
            request.set_params(params);
            endpoint.run(request).await
        }
        None => Response::status(Status::NotFound),
    };

    match response.take_session() {
        SessionUpdate::Set(s) => response.push_header("set-cookie", &session::set_cookie(&secret, &s)),
        SessionUpdate::Clear => response.push_header("set-cookie", &session::clear_cookie()),
        SessionUpdate::Unchanged => {}
    }

    Ok(response.into_http())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C, for
/// local dev). On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` never resolves — on non-Unix platforms the SIGTERM arm is
    // effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
