//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::method::Method;
use crate::session::Session;

/// An incoming HTTP request, with its body already collected and its session
/// cookie already verified and decoded.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) session: Session,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Bytes,
        session: Session,
    ) -> Self {
        Self { method, path, headers, body, params: HashMap::new(), session }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The decoded session. Logged-out default when the request carried no
    /// valid session cookie.
    pub fn session(&self) -> Session { self.session }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses the body into a field map, by content type.
    ///
    /// - empty body → empty map (a bodyless request still has a parsed body,
    ///   so verb-only routes pass an empty-field validator)
    /// - `application/json` → the object's fields; `None` if the payload is
    ///   malformed or not an object
    /// - `application/x-www-form-urlencoded` → fields as strings
    /// - anything else with a non-empty body → `None`
    pub fn parsed_body(&self) -> Option<Map<String, Value>> {
        if self.body.is_empty() {
            return Some(Map::new());
        }

        let content_type = self.header("content-type").unwrap_or("");
        if content_type.starts_with("application/json") {
            serde_json::from_slice::<Value>(&self.body)
                .ok()
                .and_then(|v| v.as_object().cloned())
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&self.body).ok()?;
            Some(pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content_type: &str, body: &str) -> Request {
        let headers = if content_type.is_empty() {
            Vec::new()
        } else {
            vec![("content-type".to_owned(), content_type.to_owned())]
        };
        Request::new(
            Method::Post,
            "/".to_owned(),
            headers,
            Bytes::from(body.to_owned()),
            Session::default(),
        )
    }

    #[test]
    fn empty_body_parses_to_empty_map() {
        let parsed = request("", "").parsed_body().unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn form_body_parses_to_string_fields() {
        let parsed = request("application/x-www-form-urlencoded", "email=a%40b.c&password=x")
            .parsed_body()
            .unwrap();
        assert_eq!(parsed["email"], Value::String("a@b.c".to_owned()));
        assert_eq!(parsed["password"], Value::String("x".to_owned()));
    }

    #[test]
    fn json_body_parses_to_object_fields() {
        let parsed = request("application/json", r#"{"email":"a@b.c","count":0}"#)
            .parsed_body()
            .unwrap();
        assert_eq!(parsed["email"], Value::String("a@b.c".to_owned()));
        assert_eq!(parsed["count"], Value::from(0));
    }

    #[test]
    fn malformed_json_has_no_parsed_body() {
        assert!(request("application/json", "{not json").parsed_body().is_none());
    }

    #[test]
    fn unknown_content_type_has_no_parsed_body() {
        assert!(request("text/plain", "email=a").parsed_body().is_none());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = request("application/json", "{}");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("x-missing"), None);
    }
}
