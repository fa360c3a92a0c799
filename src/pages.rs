//! Fixed HTML pages and response messages for the built-in controllers.

/// Warning/error messages used for server responses.
pub const WRONG_EMAIL_OR_PASSWORD: &str = "Wrong email or password!";
pub const NOT_AUTHORIZED: &str = "You are not authorized to access this page!";
pub const INVALID_REQUEST: &str = "Invalid request!";

/// Login form served at `GET /auth/login`.
pub const LOGIN_FORM: &str = r#"
<form method="POST">
    <input type="email" name="email" placeholder="Username">
    <input type="password" name="password" placeholder="Password">
    <button type="submit">Submit</button>
</form>
"#;

/// Inline failure body for a credential mismatch (served with HTTP 200).
pub const WRONG_CREDENTIALS_PAGE: &str = r#"
<div>
    <p>Wrong email or password!</p>
</div>
"#;

/// Start page for a logged-in session.
pub const LOGGED_IN_HOME: &str = r#"
<div>
    <h1>Welcome User</h1>
    <a href="/auth/logout">Log out</a>
</div>
"#;

/// Start page for a logged-out session (served with HTTP 401).
pub const NOT_LOGGED_IN_HOME: &str = r#"
<div>
    <h1>You are not logged in</h1>
    <a href="/auth/login">Log in</a>
</div>
"#;

/// Protected page for an authorized session.
pub const PROTECTED_AUTHORIZED: &str = r#"
<div>
    <p>Welcome User. Enjoy!</p>
    <a href="/auth/logout">Log out</a>
</div>
"#;

/// Guard rejection page (served with HTTP 403).
pub const PROTECTED_NOT_AUTHORIZED: &str = r#"
<div>
    <p>You are not authorized to access this page!</p>
    <a href="/auth/login">Log in</a>
</div>
"#;
