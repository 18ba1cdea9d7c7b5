//! HTTP bindings for the access gate.
//!
//! Screens and API endpoints evaluate the same gate but express the decision
//! differently: screens redirect, the API answers with a status code.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::{Deserialize, Serialize};

use super::auth::CurrentSession;
use crate::gate::{self, AUTH_ROUTE, Decision, Role, Session};
use crate::services::session::SessionUser;
use crate::state::AppState;

/// Screen rendering for a non-`Allow` decision; `None` means render the screen.
///
/// `Pending` becomes a 202 loading placeholder so clients poll rather than
/// follow a redirect.
#[must_use]
pub fn screen_response(decision: Decision) -> Option<Response> {
    match decision {
        Decision::Pending => {
            Some((StatusCode::ACCEPTED, Json(serde_json::json!({ "status": "loading" }))).into_response())
        }
        Decision::Redirect(target) => Some(Redirect::temporary(target).into_response()),
        Decision::Allow => None,
    }
}

/// API status for a non-`Allow` decision; `None` means proceed.
#[must_use]
pub fn api_status(decision: Decision) -> Option<StatusCode> {
    match decision {
        Decision::Pending => Some(StatusCode::SERVICE_UNAVAILABLE),
        Decision::Redirect(AUTH_ROUTE) => Some(StatusCode::UNAUTHORIZED),
        Decision::Redirect(_) => Some(StatusCode::FORBIDDEN),
        Decision::Allow => None,
    }
}

/// Evaluate the gate for a screen, returning the user when it may render.
///
/// # Errors
///
/// Returns the placeholder or redirect response when the screen must not render.
pub fn guard_screen(state: &AppState, current: CurrentSession, roles: &[Role]) -> Result<SessionUser, Response> {
    let decision = gate::evaluate_with(state.gate_policy(), &current.gate_session(), roles);
    if !decision.is_allowed() {
        return Err(screen_response(decision).unwrap_or_else(|| StatusCode::FORBIDDEN.into_response()));
    }
    current
        .user
        .ok_or_else(|| Redirect::temporary(AUTH_ROUTE).into_response())
}

/// Evaluate the gate for an API endpoint, returning the caller when allowed.
///
/// # Errors
///
/// Returns 401/403/503 when the caller may not proceed.
pub fn guard_api(state: &AppState, current: CurrentSession, roles: &[Role]) -> Result<SessionUser, StatusCode> {
    let decision = gate::evaluate_with(state.gate_policy(), &current.gate_session(), roles);
    if !decision.is_allowed() {
        return Err(api_status(decision).unwrap_or(StatusCode::FORBIDDEN));
    }
    current.user.ok_or(StatusCode::UNAUTHORIZED)
}

// =============================================================================
// EVALUATION ENDPOINT
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct EvaluateBody {
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub required_roles: Vec<Role>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct DecisionBody {
    pub decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
}

impl From<Decision> for DecisionBody {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Pending => Self { decision: "pending", target: None },
            Decision::Redirect(target) => Self { decision: "redirect", target: Some(target) },
            Decision::Allow => Self { decision: "allow", target: None },
        }
    }
}

/// `POST /api/gate/evaluate`: evaluate a client-held session snapshot.
pub async fn evaluate(State(state): State<AppState>, Json(body): Json<EvaluateBody>) -> Json<DecisionBody> {
    let decision = gate::evaluate_with(state.gate_policy(), &body.session, &body.required_roles);
    Json(decision.into())
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
