use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use hopespring_application::SessionStore;
use hopespring_core::AppError;
use tower_sessions::Session;

use crate::error::ApiResult;
use crate::session::CookieSession;
use crate::state::AppState;

/// Rejects requests from sessions without a role and exposes the role to
/// handlers as a request extension.
pub async fn require_session_role(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let role = CookieSession::new(session)
        .load_role()
        .await?
        .role()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(role);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Forbidden("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok());
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok());

        if !is_allowed_origin(&state.frontend_url, origin, referer) {
            return Err(AppError::Forbidden("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Browsers attach `Origin` to cross-origin mutations; requests that carry
/// neither header come from non-browser clients and pass.
fn is_allowed_origin(frontend_url: &str, origin: Option<&str>, referer: Option<&str>) -> bool {
    match (origin, referer) {
        (None, None) => true,
        (Some(origin), _) => origin == frontend_url,
        (None, Some(referer)) => referer.starts_with(frontend_url),
    }
}
