//! Built-in controllers: the session-gated start pages and the login flow.
//!
//! Shipped in-crate so an application only has to register them and serve:
//!
//! ```rust,no_run
//! use routier::{AppRouter, Server, controllers};
//!
//! #[tokio::main]
//! async fn main() {
//!     controllers::register_all();
//!     Server::bind("0.0.0.0:3000")
//!         .session_secret("change-me")
//!         .serve(AppRouter::instance())
//!         .await
//!         .unwrap();
//! }
//! ```

pub mod login;
pub mod root;

/// Installs every built-in controller on the shared application router.
pub fn register_all() {
    root::register();
    login::register();
}

#[cfg(test)]
mod tests {
    use crate::controller::Controller;
    use crate::method::Method;
    use crate::pages;
    use crate::request::Request;
    use crate::router::Router;
    use crate::session::{Session, SessionUpdate};
    use bytes::Bytes;

    fn test_router() -> Router {
        let mut router = Router::new();
        let groups: [fn() -> Controller; 2] =
            [super::root::controller, super::login::controller];
        for group in groups {
            group().install_into(&mut router);
        }
        router
    }

    fn get(path: &str, logged_in: bool) -> Request {
        Request::new(
            Method::Get,
            path.to_owned(),
            Vec::new(),
            Bytes::new(),
            Session { logged_in },
        )
    }

    fn post_form(path: &str, body: &str) -> Request {
        Request::new(
            Method::Post,
            path.to_owned(),
            vec![(
                "content-type".to_owned(),
                "application/x-www-form-urlencoded".to_owned(),
            )],
            Bytes::from(body.to_owned()),
            Session::default(),
        )
    }

    #[test]
    fn every_annotated_member_registers() {
        // root: /, /protected — login: /login GET+POST, /logout
        assert_eq!(test_router().len(), 5);
    }

    #[tokio::test]
    async fn home_reflects_session_state() {
        let router = test_router();

        let anonymous = router.handle(get("/", false)).await;
        assert_eq!(anonymous.status, 401);
        assert_eq!(anonymous.body, pages::NOT_LOGGED_IN_HOME.as_bytes());

        let logged_in = router.handle(get("/", true)).await;
        assert_eq!(logged_in.status, 200);
        assert_eq!(logged_in.body, pages::LOGGED_IN_HOME.as_bytes());
    }

    #[tokio::test]
    async fn protected_page_is_guarded() {
        let router = test_router();

        let rejected = router.handle(get("/protected", false)).await;
        assert_eq!(rejected.status, 403);
        assert_eq!(rejected.body, pages::PROTECTED_NOT_AUTHORIZED.as_bytes());

        let allowed = router.handle(get("/protected", true)).await;
        assert_eq!(allowed.status, 200);
        assert_eq!(allowed.body, pages::PROTECTED_AUTHORIZED.as_bytes());
    }

    #[tokio::test]
    async fn login_form_is_served() {
        let resp = test_router().handle(get("/auth/login", false)).await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, pages::LOGIN_FORM.as_bytes());
    }

    #[tokio::test]
    async fn login_with_fixture_credentials_sets_session_and_redirects() {
        let router = test_router();
        let mut resp = router
            .handle(post_form("/auth/login", "email=example%40example.com&password=password"))
            .await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.headers, vec![("location".to_owned(), "/".to_owned())]);
        assert!(matches!(resp.take_session(), SessionUpdate::Set(s) if s.logged_in));
    }

    #[tokio::test]
    async fn login_with_wrong_credentials_is_200_with_error_body() {
        let router = test_router();
        let mut resp = router
            .handle(post_form("/auth/login", "email=example%40example.com&password=nope"))
            .await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, pages::WRONG_CREDENTIALS_PAGE.as_bytes());
        assert!(matches!(resp.take_session(), SessionUpdate::Unchanged));
    }

    #[tokio::test]
    async fn login_with_missing_fields_is_422() {
        let router = test_router();
        assert_eq!(router.handle(post_form("/auth/login", "")).await.status, 422);
        assert_eq!(
            router.handle(post_form("/auth/login", "email=example%40example.com")).await.status,
            422
        );
    }

    #[tokio::test]
    async fn logout_clears_session_and_redirects() {
        let router = test_router();
        let mut resp = router.handle(get("/auth/logout", true)).await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.headers, vec![("location".to_owned(), "/".to_owned())]);
        assert!(matches!(resp.take_session(), SessionUpdate::Clear));

        // a follow-up visit without the session sees the logged-out page
        let home = router.handle(get("/", false)).await;
        assert_eq!(home.status, 401);
    }
}
