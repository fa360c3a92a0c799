//! Session guard middleware.

use crate::middleware::Flow;
use crate::pages;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Lets the request through only when the session says `logged_in`.
///
/// Everything else — no cookie, invalid cookie, logged-out session — gets a
/// fixed `403` page. No redirect, no token refresh.
pub async fn require_auth(req: Request) -> Flow {
    if req.session().logged_in {
        return Flow::Next(req);
    }

    Flow::Halt(
        Response::builder()
            .status(Status::Forbidden)
            .html(pages::PROTECTED_NOT_AUTHORIZED),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::session::Session;
    use bytes::Bytes;

    fn request(logged_in: bool) -> Request {
        Request::new(
            Method::Get,
            "/protected".to_owned(),
            Vec::new(),
            Bytes::new(),
            Session { logged_in },
        )
    }

    #[tokio::test]
    async fn logged_in_session_passes() {
        assert!(matches!(require_auth(request(true)).await, Flow::Next(_)));
    }

    #[tokio::test]
    async fn logged_out_session_gets_403_page() {
        match require_auth(request(false)).await {
            Flow::Halt(resp) => {
                assert_eq!(resp.status, 403);
                assert_eq!(resp.body, pages::PROTECTED_NOT_AUTHORIZED.as_bytes());
            }
            Flow::Next(_) => panic!("guard let an anonymous request through"),
        }
    }
}
