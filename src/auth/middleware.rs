//! Authorization middleware for protected routes.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::{CurrentUser, Identity, SessionConfig, session_token};
use crate::handlers::AppState;
use crate::store::UserStore;

/// Gate a request on the session state:
/// - sessions disabled: everything is public, identity is `None`
/// - no valid session: redirect to the sign-in flow
/// - signed in but terms not accepted: redirect to the terms page
pub async fn require_authorization(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(sessions) = state.sessions.clone() else {
        request.extensions_mut().insert(CurrentUser(None));
        return next.run(request).await;
    };

    let Some(identity) = resolve_identity(&sessions, state.users.as_ref(), request.headers()).await
    else {
        return Redirect::to("/signin").into_response();
    };

    if !identity.agreed_to_terms {
        return Redirect::to("/terms").into_response();
    }

    request.extensions_mut().insert(CurrentUser(Some(identity)));
    next.run(request).await
}

async fn resolve_identity(
    sessions: &SessionConfig,
    users: &dyn UserStore,
    headers: &HeaderMap,
) -> Option<Identity> {
    let token = session_token(headers)?;
    let email = sessions.signer.open(&token)?;
    if !users.in_whitelist(&email).await {
        tracing::debug!(%email, "session for non-whitelisted account");
        return None;
    }
    let user = users.load(&email).await?;
    Some(Identity {
        email: user.email,
        picture: user.picture,
        agreed_to_terms: user.agreed_to_terms,
    })
}
