//! Signed cookie session.
//!
//! The session is a single boolean flag carried in a cookie named `session`,
//! with no server-side store. The cookie value is
//! `base64url(json) "." base64url(hmac-sha256(payload, secret))` — the
//! signature covers the encoded payload, so a client can read its session but
//! cannot forge one. Any absent, malformed, or tampered cookie decodes to the
//! logged-out default.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const COOKIE_NAME: &str = "session";

/// Per-request session state.
///
/// Created on successful login, cleared on logout. Handlers read it via
/// [`Request::session`](crate::Request::session) and write it via
/// [`ResponseBuilder::session`](crate::ResponseBuilder::session) /
/// [`ResponseBuilder::clear_session`](crate::ResponseBuilder::clear_session).
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    #[serde(default)]
    pub logged_in: bool,
}

/// What a response wants done with the session cookie.
#[derive(Debug)]
pub(crate) enum SessionUpdate {
    Unchanged,
    Set(Session),
    Clear,
}

fn sign(secret: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Encodes and signs a session into a cookie value.
pub(crate) fn encode(secret: &[u8], session: &Session) -> String {
    let payload =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(session).expect("session serializes to JSON"));
    let sig = URL_SAFE_NO_PAD.encode(sign(secret, payload.as_bytes()));
    format!("{payload}.{sig}")
}

/// Decodes the session out of a `cookie` request header.
///
/// Every failure mode collapses to the logged-out default — a bad cookie is
/// indistinguishable from no cookie.
pub(crate) fn decode(secret: &[u8], cookie_header: Option<&str>) -> Session {
    let Some(header) = cookie_header else {
        return Session::default();
    };
    let Some(raw) = header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(COOKIE_NAME).and_then(|r| r.strip_prefix('=')))
    else {
        return Session::default();
    };
    let Some((payload, sig)) = raw.split_once('.') else {
        return Session::default();
    };
    let Ok(sig) = URL_SAFE_NO_PAD.decode(sig) else {
        return Session::default();
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(payload.as_bytes());
    if mac.verify_slice(&sig).is_err() {
        return Session::default();
    }

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload) else {
        return Session::default();
    };
    serde_json::from_slice(&bytes).unwrap_or_default()
}

/// `set-cookie` value installing `session`.
pub(crate) fn set_cookie(secret: &[u8], session: &Session) -> String {
    format!("{COOKIE_NAME}={}; Path=/; HttpOnly", encode(secret, session))
}

/// `set-cookie` value expiring `session` immediately.
pub(crate) fn clear_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; Max-Age=0")
}
