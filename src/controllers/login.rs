//! Login form, credential check, and logout.

use serde_json::Value;

use crate::controller::Controller;
use crate::pages;
use crate::request::Request;
use crate::response::Response;
use crate::session::Session;
use crate::status::Status;

/// The single accepted credential pair.
const MOCK_EMAIL: &str = "example@example.com";
const MOCK_PASSWORD: &str = "password";

/// Installs the login controller on the shared application router.
pub fn register() {
    controller().install();
}

pub(crate) fn controller() -> Controller {
    let mut auth = Controller::new("/auth");
    auth.handle("get_login", get_login).get("/login");
    auth.handle("post_login", post_login)
        .post("/login")
        .body_fields(["email", "password"]);
    auth.handle("get_logout", get_logout).get("/logout");
    auth
}

async fn get_login(_req: Request) -> Response {
    Response::html(pages::LOGIN_FORM)
}

/// The generated body validator guarantees `email` and `password` are present
/// and truthy by the time this runs.
///
/// A credential mismatch responds `200` with an inline error body, not a
/// `401` — kept as-is from the behavior this mirrors.
async fn post_login(req: Request) -> Response {
    let body = req.parsed_body().unwrap_or_default();
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();

    if email == MOCK_EMAIL && password == MOCK_PASSWORD {
        Response::builder()
            .status(Status::Ok)
            .header("location", "/")
            .session(Session { logged_in: true })
            .no_body()
    } else {
        Response::html(pages::WRONG_CREDENTIALS_PAGE)
    }
}

async fn get_logout(_req: Request) -> Response {
    Response::builder()
        .status(Status::Ok)
        .header("location", "/")
        .clear_session()
        .no_body()
}
