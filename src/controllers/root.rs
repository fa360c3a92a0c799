//! Start page and the guarded `/protected` page.

use crate::controller::Controller;
use crate::middleware::require_auth;
use crate::pages;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Installs the root controller on the shared application router.
pub fn register() {
    controller().install();
}

pub(crate) fn controller() -> Controller {
    let mut root = Controller::new("");
    root.handle("get_root", get_root).get("/");
    root.handle("get_protected", get_protected)
        .get("/protected")
        .with(require_auth);
    root
}

async fn get_root(req: Request) -> Response {
    if req.session().logged_in {
        Response::html(pages::LOGGED_IN_HOME)
    } else {
        Response::builder()
            .status(Status::Unauthorized)
            .html(pages::NOT_LOGGED_IN_HOME)
    }
}

/// Only reachable through [`require_auth`].
async fn get_protected(_req: Request) -> Response {
    Response::html(pages::PROTECTED_AUTHORIZED)
}
