//! Auth routes: session extraction, e-mail access codes and logout.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{error, info, warn};

use super::status::email_auth_error_to_status;
use crate::gate::{self, ROOT_ROUTE};
use crate::services::email_auth::{self, AccessCodeRequest};
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// SESSION EXTRACTORS
// =============================================================================

/// Session resolved from the request cookie. Never rejects: a missing,
/// unknown, or unresolvable token yields an anonymous session.
pub struct CurrentSession {
    pub user: Option<SessionUser>,
    pub token: Option<String>,
}

impl CurrentSession {
    /// Snapshot for the access gate.
    #[must_use]
    pub fn gate_session(&self) -> gate::Session {
        self.user
            .as_ref()
            .map_or_else(gate::Session::anonymous, SessionUser::to_gate_session)
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Ok(Self { user: None, token: None });
        }

        let app_state = AppState::from_ref(state);
        let user = match session::validate_session(&app_state.pool, token).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "session lookup failed; treating request as anonymous");
                None
            }
        };

        Ok(Self { user, token: Some(token.to_owned()) })
    }
}

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(current) = CurrentSession::from_request_parts(parts, state).await;
        match (current.user, current.token) {
            (Some(user), Some(token)) => Ok(Self { user, token }),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        warn!(error = %e, user_id = %auth.user.id, "session delete failed");
    }

    let jar = CookieJar::new().add(cleared_session_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

/// `POST /api/auth/email/request-code`: sign up or sign in by e-mail.
pub async fn request_email_code(State(state): State<AppState>, Json(body): Json<AccessCodeRequest>) -> Response {
    let issued = match email_auth::request_access_code(&state.pool, &body).await {
        Ok(issued) => issued,
        Err(e) => return email_auth_error_to_status(&e).into_response(),
    };
    let (email, code) = (issued.email, issued.code);

    match &state.config.mailer {
        Some(mailer) => {
            if let Err(e) = email_auth::send_access_code_email(&mailer.api_key, &mailer.from, &email, &code).await {
                error!(error = %e, %email, "access code delivery failed");
                return email_auth_error_to_status(&e).into_response();
            }
            info!(%email, "access code sent");
        }
        None => info!(%email, %code, "mailer not configured; access code logged"),
    }

    Json(serde_json::json!({ "ok": true })).into_response()
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    pub code: String,
}

/// `POST /api/auth/email/verify-code`: exchange a code for a session cookie.
///
/// Responds with the dashboard the caller should land on.
pub async fn verify_email_code(State(state): State<AppState>, Json(body): Json<VerifyCodeBody>) -> Response {
    let user_id = match email_auth::verify_access_code(&state.pool, &body.email, &body.code).await {
        Ok(id) => id,
        Err(e) => return email_auth_error_to_status(&e).into_response(),
    };

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, %user_id, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    let redirect = match session::validate_session(&state.pool, &token).await {
        Ok(Some(user)) => user.role.map_or(ROOT_ROUTE, |role| role.home_route()),
        Ok(None) => ROOT_ROUTE,
        Err(e) => {
            warn!(error = %e, %user_id, "role lookup after sign-in failed");
            ROOT_ROUTE
        }
    };

    info!(%user_id, redirect, "signed in");
    let jar = CookieJar::new().add(session_cookie(token, state.config.cookie_secure));
    (jar, Json(serde_json::json!({ "redirect": redirect }))).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
