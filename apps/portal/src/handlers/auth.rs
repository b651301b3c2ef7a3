use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::{
    LoginRequest, LoginResponse, NavigationDecisionResponse, NavigationQuery, SessionResponse,
};
use crate::error::ApiResult;
use crate::session::CookieSession;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = CookieSession::new(session);
    let outcome = state
        .auth_service
        .login(&session, &payload.username, &payload.password)
        .await
        .inspect_err(|_| warn!(username = %payload.username, "login rejected"))?;

    info!(role = %outcome.role, "session signed in");
    Ok(Json(LoginResponse::from(outcome)))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<StatusCode> {
    state
        .appointment_form_service
        .close(&state.form_store(session.clone()))
        .await?;
    state
        .auth_service
        .logout(&CookieSession::new(session))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn session_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<SessionResponse>> {
    let view = state
        .access_guard_service
        .session_view(&CookieSession::new(session))
        .await?;

    Ok(Json(SessionResponse::from(view)))
}

pub async fn navigation_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NavigationQuery>,
) -> ApiResult<Json<NavigationDecisionResponse>> {
    let decision = state
        .access_guard_service
        .navigate(&CookieSession::new(session), &query.path)
        .await?;

    Ok(Json(NavigationDecisionResponse::from(decision)))
}
