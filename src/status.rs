//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted — `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use routier::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NotFound);
//!
//! // custom status with a body
//! Response::builder()
//!     .status(Status::UnprocessableContent)
//!     .text("Invalid request!");
//! ```

/// The status codes this crate's responses use.
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    Found,                // 302
    SeeOther,             // 303

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    Unauthorized,         // 401
    Forbidden,            // 403
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableContent, // 422

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
    ServiceUnavailable,   // 503
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::Created              => 201,
            Status::NoContent            => 204,
            Status::Found                => 302,
            Status::SeeOther             => 303,
            Status::BadRequest           => 400,
            Status::Unauthorized         => 401,
            Status::Forbidden            => 403,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::UnprocessableContent => 422,
            Status::InternalServerError  => 500,
            Status::ServiceUnavailable   => 503,
        }
    }
}
