//! Cookie-backed session middleware.

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};

use super::handlers::AppState;
use crate::session::SessionToken;

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "todo_session";

/// Find the value of cookie `name` in the request headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `Set-Cookie` header value for a freshly issued token.
pub fn session_cookie(name: &str, token: &SessionToken) -> String {
    format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Resolve the caller's session, creating an empty one on first contact.
///
/// The token is stored in the request extensions for the handlers. When a
/// new session is created the response carries the cookie for it. Only
/// matched routes pass through here, so unknown paths never open a session.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = cookie_value(request.headers(), &state.cookie_name)
        .and_then(|raw| raw.parse::<SessionToken>().ok());

    let existing = match presented {
        Some(token) => match state.store.contains(&token) {
            Ok(true) => Some(token),
            Ok(false) => None,
            Err(e) => {
                error!(error = %e, "failed to look up session");
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        },
        None => None,
    };

    let (token, fresh) = match existing {
        Some(token) => (token, false),
        None => {
            let token = state.store.create().map_err(|e| {
                error!(error = %e, "failed to create session");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            debug!(session = %token, active = state.store.count(), "session created");
            (token, true)
        }
    };

    request.extensions_mut().insert(token);
    let mut response = next.run(request).await;

    if fresh {
        let cookie = session_cookie(&state.cookie_name, &token);
        let value = HeaderValue::from_str(&cookie).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        response.headers_mut().append(SET_COOKIE, value);
    }

    Ok(response)
}
