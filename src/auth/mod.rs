//! Session handling around the external identity provider.
//!
//! The OAuth exchange itself happens elsewhere; this module only carries the
//! resulting identity through a signed session cookie and gates protected
//! routes on sign-in and terms consent. Identity travels as a request-scoped
//! extension value, never as process-global state.

mod cookie;
mod middleware;

pub use cookie::SessionSigner;
pub use middleware::require_authorization;

use axum::http::{HeaderMap, header};

/// Cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "bravor_session";

/// The signed-in user, as seen by one request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub picture: String,
    pub agreed_to_terms: bool,
}

/// Session configuration; absent entirely when sessions are disabled.
#[derive(Clone)]
pub struct SessionConfig {
    pub signer: SessionSigner,
    /// Authorization URL of the external identity provider, for `/signin`.
    pub provider_url: Option<String>,
}

/// Request-scoped identity inserted by [`require_authorization`].
/// `None` when sessions are disabled.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

/// Extract the raw session token from the Cookie header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Set-Cookie value clearing the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}
