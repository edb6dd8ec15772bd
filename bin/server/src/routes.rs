//! HTTP routes for the token lifecycle and the internal experiments
//! lookup.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use facility_auth_access::Credentials;
use facility_auth_tokens::UserNumber;
use serde::{Deserialize, Serialize};
use time::Duration as TimeDuration;

use crate::AppState;
use crate::config::REFRESH_TOKEN_LIFETIME_HOURS;
use crate::error::ApiError;

/// Refresh-token cookie name.
const REFRESH_COOKIE: &str = "refresh_token";

/// The refresh cookie is scoped to the one endpoint that consumes it.
const REFRESH_COOKIE_PATH: &str = "/api/jwt/refresh";

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/jwt/authenticate", post(authenticate))
        .route("/api/jwt/checkToken", post(check_token))
        .route("/api/jwt/refresh", post(refresh))
        .route("/experiments", get(experiments))
        .with_state(state)
}

/// Request body carrying a single access token.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    token: String,
}

/// Response body carrying a single access token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    token: String,
}

/// Query parameters for the experiments route.
#[derive(Debug, Deserialize)]
pub struct ExperimentsQuery {
    user_number: i64,
}

/// Logs in with a facilities account.
///
/// Returns the access token in the response body and the refresh token
/// as an HttpOnly cookie scoped to the refresh endpoint.
async fn authenticate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(username = %credentials.masked_username(), "starting login");

    let pair = state.sessions.login(&credentials).await?;

    let cookie = Cookie::build((REFRESH_COOKIE, pair.refresh_token))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(state.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::hours(REFRESH_TOKEN_LIFETIME_HOURS));

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            token: pair.access_token,
        }),
    ))
}

/// Verifies that an access token was issued by this server and has not
/// expired.
async fn check_token(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("verifying access token");
    state.sessions.verify_access_token(&request.token)?;
    tracing::info!("access token verified");
    Ok(Json("ok"))
}

/// Reissues an access token under the refresh-token cookie.
async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("refreshing access token");

    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string());

    let token = state
        .sessions
        .refresh_access_token(&request.token, refresh_token.as_deref())?;

    Ok(Json(TokenResponse { token }))
}

/// Returns the experiment (RB) numbers for a user number.
///
/// Internal route, guarded by the configured API key rather than a
/// session token.
async fn experiments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ExperimentsQuery>,
) -> Result<Json<Vec<i64>>, ApiError> {
    let api_key = bearer_token(&headers).ok_or(ApiError::Forbidden)?;
    if api_key != state.api_key {
        return Err(ApiError::Forbidden);
    }

    let experiments = state
        .allocations
        .experiments_for(UserNumber::new(query.user_number))
        .await?;

    Ok(Json(experiments))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
