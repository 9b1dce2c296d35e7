//! Axum route handlers for registration and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::jwt::{AuthUser, Claims};
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{NewUser, UserRow};
use crate::state::AppState;
use crate::store::StoreError;

/// Password accepted for any identity when no database is configured.
const MOCK_PASSWORD: &str = "password";
const MOCK_USER_ID: &str = "mock_id";
const DEBUG_USER_ID: &str = "debug_id";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub username: Option<String>,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RegisterRequest {
    fn resolved_full_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            self.resolved_username()
        } else {
            joined
        }
    }

    fn resolved_username(&self) -> String {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from)
            .unwrap_or_else(|| local_part(&self.email).to_string())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[allow(dead_code)]
    pub token: String,
    #[allow(dead_code)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_name: Option<String>,
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn first_word(name: &str) -> String {
    name.split_whitespace().next().unwrap_or("User").to_string()
}

fn bearer(state: &AppState, email: &str, id: &str, user_name: String) -> Result<TokenResponse, AppError> {
    let access_token = state
        .tokens
        .issue(email, id)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user_name: Some(user_name),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    request.validate()?;

    let full_name = request.resolved_full_name();
    let username = request.resolved_username();

    let Some(store) = state.store.as_ref() else {
        info!("No database configured, issuing mock registration token");
        return Ok(Json(bearer(&state, &request.email, MOCK_USER_ID, first_word(&full_name))?));
    };

    let taken = store.find_user_by_email(&request.email).await?.is_some()
        || store.find_user_by_username(&username).await?.is_some();
    if taken {
        return Err(AppError::Conflict("Email or username already registered.".to_string()));
    }

    let password_hash = hash_password(&request.password).map_err(|e| AppError::Internal(e.into()))?;

    let user = store
        .insert_user(NewUser {
            email: request.email.clone(),
            username,
            full_name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => {
                AppError::Conflict("Email or username already registered.".to_string())
            }
            other => AppError::Database(other),
        })?;

    info!("Registered user {}", user.id);
    Ok(Json(bearer(&state, &user.email, &user.id.to_string(), user.display_name())?))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    request.validate()?;
    let identity = request.username_or_email.trim();

    if let Some((debug_user, debug_password)) = &state.config.debug_login {
        if identity == debug_user && request.password == *debug_password {
            warn!("Debug credential used to log in");
            let name = first_word(local_part(debug_user));
            return Ok(Json(bearer(&state, debug_user, DEBUG_USER_ID, name)?));
        }
    }

    let Some(store) = state.store.as_ref() else {
        if request.password == MOCK_PASSWORD {
            return Ok(Json(bearer(&state, identity, MOCK_USER_ID, first_word(local_part(identity)))?));
        }
        return Err(AppError::InvalidCredentials);
    };

    let user = match store.find_user_by_email(identity).await? {
        Some(user) => Some(user),
        None => store.find_user_by_username(identity).await?,
    };
    let user = user.ok_or(AppError::InvalidCredentials)?;

    if !password_matches(&user, &request.password) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(bearer(&state, &user.email, &user.id.to_string(), user.display_name())?))
}

fn password_matches(user: &UserRow, password: &str) -> bool {
    let Some(hash) = user.password_hash.as_deref() else {
        return false;
    };
    verify_password(password, hash).unwrap_or_else(|e| {
        warn!("Stored password hash for user {} is unusable: {e}", user.id);
        false
    })
}

/// POST /auth/forgot-password
pub async fn handle_forgot_password(
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;
    Ok(Json(json!({
        "message": "If an account exists for this email, you will receive a password reset link shortly."
    })))
}

/// POST /auth/reset-password
pub async fn handle_reset_password(Json(_request): Json<ResetPasswordRequest>) -> Json<Value> {
    Json(json!({ "message": "Password has been reset successfully." }))
}

/// GET /auth/me
pub async fn handle_me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}
