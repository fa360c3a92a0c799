//! Body validator middleware factory.

use serde_json::Value;
use tracing::warn;

use crate::middleware::{Flow, Middleware};
use crate::pages;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Builds a middleware that rejects requests whose body lacks a truthy value
/// for any of `fields`, in list order, short-circuiting on the first miss.
///
/// A request with no parsed body at all (an unparseable payload) is rejected
/// outright. Every rejection is a `422` with a fixed message and a logged
/// warning; the downstream handler never runs.
///
/// Field names are matched verbatim — the registration driver lowercases them
/// at declaration time.
pub fn body_validator(fields: Vec<String>) -> impl Middleware {
    move |req: Request| {
        let fields = fields.clone();
        async move {
            let Some(body) = req.parsed_body() else {
                warn!(path = %req.path(), "{}", pages::INVALID_REQUEST);
                return Flow::Halt(invalid_request());
            };

            for field in &fields {
                if !is_truthy(body.get(field.as_str())) {
                    warn!(path = %req.path(), field = %field, "{}", pages::INVALID_REQUEST);
                    return Flow::Halt(invalid_request());
                }
            }

            Flow::Next(req)
        }
    }
}

fn invalid_request() -> Response {
    Response::builder()
        .status(Status::UnprocessableContent)
        .text(pages::INVALID_REQUEST)
}

/// JavaScript-style truthiness: absent, `null`, `false`, numeric zero, and
/// the empty string all count as missing. Legitimately falsy values (the
/// password `"0"` is fine, the number `0` is not) are rejected too — a known
/// looseness, kept on purpose.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::session::Session;
    use bytes::Bytes;

    fn form_request(body: &str) -> Request {
        Request::new(
            Method::Post,
            "/auth/login".to_owned(),
            vec![(
                "content-type".to_owned(),
                "application/x-www-form-urlencoded".to_owned(),
            )],
            Bytes::from(body.to_owned()),
            Session::default(),
        )
    }

    fn json_request(body: &str) -> Request {
        Request::new(
            Method::Post,
            "/auth/login".to_owned(),
            vec![("content-type".to_owned(), "application/json".to_owned())],
            Bytes::from(body.to_owned()),
            Session::default(),
        )
    }

    fn email_password() -> Vec<String> {
        vec!["email".to_owned(), "password".to_owned()]
    }

    // exercise the same erased path the router uses
    async fn run(fields: Vec<String>, req: Request) -> Flow {
        use crate::middleware::{ErasedMiddleware as _, Middleware as _};
        body_validator(fields).into_boxed_middleware().call(req).await
    }

    fn assert_invalid(flow: Flow) {
        match flow {
            Flow::Halt(resp) => {
                assert_eq!(resp.status, 422);
                assert_eq!(resp.body, pages::INVALID_REQUEST.as_bytes());
            }
            Flow::Next(_) => panic!("validator passed an invalid request"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_missing_every_field() {
        assert_invalid(run(email_password(), form_request("")).await);
    }

    #[tokio::test]
    async fn stops_at_first_missing_field() {
        assert_invalid(run(email_password(), form_request("email=a%40b.c")).await);
    }

    #[tokio::test]
    async fn all_fields_present_passes_downstream() {
        let flow = run(email_password(), form_request("email=a%40b.c&password=x")).await;
        assert!(matches!(flow, Flow::Next(_)));
    }

    #[tokio::test]
    async fn unparseable_body_is_rejected() {
        assert_invalid(run(email_password(), json_request("{not json")).await);
    }

    #[tokio::test]
    async fn empty_field_list_passes_anything() {
        assert!(matches!(run(Vec::new(), form_request("")).await, Flow::Next(_)));
    }

    #[tokio::test]
    async fn falsy_json_values_count_as_missing() {
        for body in [
            r#"{"email":"a@b.c","password":null}"#,
            r#"{"email":"a@b.c","password":false}"#,
            r#"{"email":"a@b.c","password":0}"#,
            r#"{"email":"a@b.c","password":""}"#,
        ] {
            assert_invalid(run(email_password(), json_request(body)).await);
        }
    }

    #[test]
    fn truthiness_table() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&Value::Bool(false))));
        assert!(!is_truthy(Some(&Value::from(0))));
        assert!(!is_truthy(Some(&Value::from(0.0))));
        assert!(!is_truthy(Some(&Value::from(""))));
        assert!(is_truthy(Some(&Value::from("0"))));
        assert!(is_truthy(Some(&Value::from(1))));
        assert!(is_truthy(Some(&Value::Bool(true))));
    }
}
