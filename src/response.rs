//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it. A response can also
//! carry a session directive — set or clear — which the server turns into a
//! `set-cookie` header on the way out.

use bytes::Bytes;
use http_body_util::Full;

use crate::session::{Session, SessionUpdate};
use crate::status::Status;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use routier::{Response, Status};
///
/// Response::html("<h1>hi</h1>");
/// Response::text("hello");
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::status(Status::NoContent);
/// ```
///
/// # Builder (custom status, headers, or session changes)
///
/// ```rust
/// use routier::{Response, Session, Status};
///
/// Response::builder()
///     .status(Status::Ok)
///     .header("location", "/")
///     .session(Session { logged_in: true })
///     .no_body();
/// ```
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: u16,
    pub(crate) session: SessionUpdate,
}

impl Response {
    /// `200 OK` — `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::bytes_raw("text/html; charset=utf-8", body.into().into_bytes())
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// `200 OK` — `application/json`. Pass bytes from your serialiser directly.
    pub fn json(body: Vec<u8>) -> Self {
        Self::bytes_raw("application/json", body)
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self {
            body: Vec::new(),
            headers: Vec::new(),
            status: code.into(),
            session: SessionUpdate::Unchanged,
        }
    }

    /// Builder for responses that need a custom status, extra headers, or a
    /// session change.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder {
            headers: Vec::new(),
            status: Status::Ok.into(),
            session: SessionUpdate::Unchanged,
        }
    }

    fn bytes_raw(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: Status::Ok.into(),
            session: SessionUpdate::Unchanged,
        }
    }

    pub(crate) fn push_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    pub(crate) fn take_session(&mut self) -> SessionUpdate {
        std::mem::replace(&mut self.session, SessionUpdate::Unchanged)
    }

    /// Converts into the hyper-facing response type.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(
            http::StatusCode::from_u16(self.status)
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR),
        );
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(resp) => resp,
            Err(_) => {
                // A handler produced an unencodable header name or value.
                let mut resp = http::Response::new(Full::new(Bytes::new()));
                *resp.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                resp
            }
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
    session: SessionUpdate,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Install `session` on the client via a signed `set-cookie` header.
    pub fn session(mut self, session: Session) -> Self {
        self.session = SessionUpdate::Set(session);
        self
    }

    /// Expire the client's session cookie.
    pub fn clear_session(mut self) -> Self {
        self.session = SessionUpdate::Clear;
        self
    }

    /// Terminate with an HTML body (`text/html; charset=utf-8`).
    pub fn html(self, body: impl Into<String>) -> Response {
        self.finish("text/html; charset=utf-8", body.into().into_bytes())
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish("application/json", body)
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response {
            body: Vec::new(),
            headers: self.headers,
            status: self.status,
            session: self.session,
        }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status, session: self.session }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}
