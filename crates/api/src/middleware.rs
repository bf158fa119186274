//! Session middleware: cookie in, session/principal context out.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crewdir_auth::SessionId;

use crate::app::AppState;
use crate::context::{PrincipalContext, SessionContext};

/// Name of the session cookie. The value is an opaque random id; all
/// session contents stay server-side.
pub const SESSION_COOKIE: &str = "crewdir_session";

/// Resolve (or open) the browser session and expose it via extensions.
///
/// Unknown or missing cookies get a freshly minted session id attached to
/// the response as a `Set-Cookie` header. Minting stores nothing: the
/// registry only holds sessions that carry state, so anonymous traffic
/// cannot grow it.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let existing = extract_session_id(req.headers()).filter(|id| state.sessions.exists(id));

    let (session_id, fresh) = match existing {
        Some(id) => (id, false),
        None => (state.sessions.mint(), true),
    };

    req.extensions_mut().insert(SessionContext::new(session_id));
    req.extensions_mut()
        .insert(PrincipalContext::new(state.sessions.principal(&session_id)));

    let mut response = next.run(req).await;

    if fresh {
        if let Ok(value) = HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax"
        )) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// `Set-Cookie` value that drops the session cookie (logout).
pub fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static("crewdir_session=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax")
}

fn extract_session_id(headers: &HeaderMap) -> Option<SessionId> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            SessionId::parse(value.trim())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_found_among_others() {
        let store = crewdir_auth::SessionStore::new();
        let id = store.mint();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en")).unwrap(),
        );

        assert_eq!(extract_session_id(&headers), Some(id));
    }

    #[test]
    fn malformed_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("crewdir_session=not-a-uuid"),
        );
        assert_eq!(extract_session_id(&headers), None);
    }
}
