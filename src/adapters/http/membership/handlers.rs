//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to the membership store and the
//! application layer query handlers.

use std::fmt::Display;

use axum::extract::{Json, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use crate::application::handlers::membership::{
    CheckRaceAccessHandler, CheckRaceAccessQuery, LookupMembershipHandler, LookupMembershipQuery,
    MembershipStore,
};
use crate::domain::foundation::Email;
use crate::domain::membership::{MembershipError, DEFAULT_TOTAL_RACES};

use super::dto::{EmailQuery, ErrorResponse, LookupResponse, RaceAccessQuery, RaceAccessResponse};

/// Body of 500 responses when verbose errors are off.
const GENERIC_ERROR_MESSAGE: &str = "internal server error";

// ════════════════════════════════════════════════════════════════════════════════
// Error Types
// ════════════════════════════════════════════════════════════════════════════════

/// Plain-text errors of the debug lookup.
#[derive(Debug)]
pub enum DebugLookupError {
    MissingEmail,
    NotFound(Email),
    Internal(String),
}

impl IntoResponse for DebugLookupError {
    fn into_response(self) -> Response {
        match self {
            DebugLookupError::MissingEmail => {
                (StatusCode::BAD_REQUEST, "missing email parameter").into_response()
            }
            DebugLookupError::NotFound(email) => (
                StatusCode::NOT_FOUND,
                MembershipError::NotFound(email).to_string(),
            )
                .into_response(),
            DebugLookupError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: {}", message),
            )
                .into_response(),
        }
    }
}

/// JSON errors of the public membership endpoints.
#[derive(Debug)]
pub enum MembershipApiError {
    MissingEmail,
    InvalidParameter(String),
    NotFound,
    Internal(Option<String>),
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> Response {
        match self {
            MembershipApiError::MissingEmail => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("missing email")),
            )
                .into_response(),
            MembershipApiError::InvalidParameter(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_details("invalid parameter", message)),
            )
                .into_response(),
            MembershipApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(LookupResponse::not_found())).into_response()
            }
            MembershipApiError::Internal(details) => {
                let body = match details {
                    Some(details) => ErrorResponse::with_details("server_error", details),
                    None => ErrorResponse::new("server_error"),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for membership endpoints.
#[derive(Clone)]
pub struct MembershipAppState {
    pub store: MembershipStore,
    /// Include internal error messages in 500 bodies.
    pub verbose_errors: bool,
}

impl MembershipAppState {
    pub fn new(store: MembershipStore, verbose_errors: bool) -> Self {
        Self {
            store,
            verbose_errors,
        }
    }

    pub fn lookup_handler(&self) -> LookupMembershipHandler {
        LookupMembershipHandler::new(self.store.clone())
    }

    pub fn race_access_handler(&self) -> CheckRaceAccessHandler {
        CheckRaceAccessHandler::new(self.store.clone())
    }

    fn error_details(&self, err: &dyn Display) -> Option<String> {
        self.verbose_errors.then(|| err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /api/membership/debug?email=`
///
/// Looks the email up exactly as given and returns the stored document as
/// written, field names and all.
pub async fn debug_membership(
    State(state): State<MembershipAppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Response, DebugLookupError> {
    let email = query
        .email()
        .and_then(|raw| Email::new(raw).ok())
        .ok_or(DebugLookupError::MissingEmail)?;

    info!(email = %email, "debug membership lookup");

    match state.store.get_stored_document(&email).await {
        Ok(document) => Ok(([(CONTENT_TYPE, "application/json")], document).into_response()),
        Err(MembershipError::NotFound(email)) => Err(DebugLookupError::NotFound(email)),
        Err(MembershipError::Store(err)) => {
            error!(email = %email, error = %err, "membership debug lookup failed");
            let message = state
                .error_details(&err)
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
            Err(DebugLookupError::Internal(message))
        }
    }
}

/// `GET /api/membership?email=`
///
/// Case-insensitive lookup used by the site's account page.
pub async fn lookup_membership(
    State(state): State<MembershipAppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<LookupResponse>, MembershipApiError> {
    let query = query
        .email()
        .and_then(|raw| LookupMembershipQuery::from_input(raw).ok())
        .ok_or(MembershipApiError::MissingEmail)?;
    let email = query.email.clone();

    match state.lookup_handler().handle(query).await {
        Ok(record) => Ok(Json(LookupResponse::found(record))),
        Err(MembershipError::NotFound(_)) => Err(MembershipApiError::NotFound),
        Err(MembershipError::Store(err)) => {
            error!(email = %email, error = %err, "membership lookup failed");
            Err(MembershipApiError::Internal(state.error_details(&err)))
        }
    }
}

/// `GET /api/membership/access?email=&race=&total_races=`
///
/// `total_races` defaults to a full twelve-race card.
pub async fn check_race_access(
    State(state): State<MembershipAppState>,
    Query(query): Query<RaceAccessQuery>,
) -> Result<Json<RaceAccessResponse>, MembershipApiError> {
    let raw_email = query
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or(MembershipApiError::MissingEmail)?;
    let race = query
        .race
        .ok_or_else(|| MembershipApiError::InvalidParameter("missing race".to_string()))?;
    let total_races = query.total_races.unwrap_or(DEFAULT_TOTAL_RACES);

    let access_query = CheckRaceAccessQuery::new(raw_email, race, total_races)
        .map_err(|e| MembershipApiError::InvalidParameter(e.to_string()))?;
    let email = access_query.email.to_string();

    let result = state
        .race_access_handler()
        .handle(access_query)
        .await
        .map_err(|err| {
            error!(email = %email, error = %err, "race access check failed");
            MembershipApiError::Internal(state.error_details(&err))
        })?;

    Ok(Json(RaceAccessResponse {
        email,
        plan: result.plan,
        race,
        total_races,
        allowed: result.allowed,
    }))
}
