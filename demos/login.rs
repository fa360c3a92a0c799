//! Minimal routier example — the built-in session-gated login site.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example login
//!
//! Try:
//!   curl -i http://localhost:3000/
//!   curl -i http://localhost:3000/protected
//!   curl -i http://localhost:3000/auth/login
//!   curl -i -X POST http://localhost:3000/auth/login \
//!        -d 'email=example@example.com&password=password'
//!   # replay the set-cookie value from the login response:
//!   curl -i http://localhost:3000/protected -H 'cookie: session=…'

use routier::{AppRouter, Server, controllers};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    controllers::register_all();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_owned());
    let secret =
        std::env::var("SESSION_SECRET").unwrap_or_else(|_| "@RandomSecret22!".to_owned());

    Server::bind(&format!("0.0.0.0:{port}"))
        .session_secret(secret)
        .serve(AppRouter::instance())
        .await
        .expect("server error");
}
