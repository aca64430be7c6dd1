use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    activity::{self, LogEvent},
    auth::{
        dto::{
            present, DeleteAccountRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
            ResetPasswordRequest, SuccessResponse,
        },
        password::{hash_password, verify_password},
        repo_types::{Account, ResetRequest},
        reset,
        validate::{is_valid_email, is_valid_password, PASSWORD_RULE},
    },
    error::ApiError,
    mailer::{reset_code_email, RESET_EMAIL_SUBJECT},
    state::AppState,
};

/// Login failures share one message so the response never distinguishes an
/// unknown email from a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Returned whether or not the account exists.
const FORGOT_RESPONSE: &str = "If the account exists, the code has been sent to your email.";

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/delete-account", delete(delete_account))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();

    let (Some(email), Some(password), Some(confirm)) = (
        present(&payload.email),
        present(&payload.password),
        present(&payload.confirm_password),
    ) else {
        return Err(ApiError::bad_request(
            "Email, password and confirm password are required",
        ));
    };

    if !is_valid_password(password) || !is_valid_password(confirm) {
        return Err(ApiError::bad_request(PASSWORD_RULE));
    }
    if !is_valid_email(email) {
        warn!(%email, "invalid email format");
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if password != confirm {
        return Err(ApiError::bad_request(
            "Password and confirm password must match",
        ));
    }

    match Account::find_by_email(&state.db, email).await {
        Ok(Some(_)) => {
            warn!(%email, "account already exists");
            return Err(ApiError::bad_request("Account already exists"));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal);
        }
    }

    let hash = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(ApiError::Internal);
        }
    };

    if let Err(e) = Account::create(&state.db, email, &hash, now).await {
        error!(error = %e, "create account failed");
        return Err(ApiError::Internal);
    }

    activity::record(&state, email, now, LogEvent::Register);

    info!(%email, "account registered");
    Ok(Json(SuccessResponse::new("Account created")))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();

    let (Some(email), Some(password)) = (present(&payload.email), present(&payload.password))
    else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    if !is_valid_password(password) {
        return Err(ApiError::bad_request(PASSWORD_RULE));
    }
    if !is_valid_email(email) {
        warn!(%email, "invalid email format");
        return Err(ApiError::bad_request("Invalid email format"));
    }

    let account = match Account::find_by_email(&state.db, email).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            warn!(%email, "login unknown email");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        Err(e) => {
            // Same 401 as a miss; the lookup failure stays in operator logs.
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    if !verify_password(password, &account.password_hash) {
        warn!(%email, "login invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if let Err(e) = Account::touch_last_login(&state.db, email, now).await {
        error!(error = %e, "update last_login failed");
        return Err(ApiError::Internal);
    }

    activity::record(&state, email, now, LogEvent::Login);

    info!(%email, "login successful");
    Ok(Json(SuccessResponse::new("Login successful")))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();

    let Some(email) = present(&payload.email) else {
        return Err(ApiError::bad_request("Email is required"));
    };

    // Invalidate prior codes first; at most one live request per email.
    if let Err(e) = ResetRequest::purge_for_email(&state.db, email).await {
        error!(error = %e, "purge reset requests failed");
        return Err(ApiError::Internal);
    }

    match Account::find_by_email(&state.db, email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            // Identical body to the success path.
            return Ok(Json(SuccessResponse::new(FORGOT_RESPONSE)));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal);
        }
    }

    let code = reset::generate_code();
    let expires_at = reset::expiry_from(now);

    if let Err(e) = ResetRequest::create(&state.db, email, &code, expires_at).await {
        error!(error = %e, "create reset request failed");
        return Err(ApiError::Internal);
    }

    if let Err(e) = state
        .mailer
        .send(email, RESET_EMAIL_SUBJECT, &reset_code_email(&code))
        .await
    {
        // The response stays the generic 200 either way; dispatch trouble is
        // operator-facing only.
        error!(error = %e, %email, "reset email dispatch failed");
    }

    info!(%email, "reset code issued");
    Ok(Json(SuccessResponse::new(FORGOT_RESPONSE)))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();

    let (Some(email), Some(code), Some(new_password)) = (
        present(&payload.email),
        present(&payload.code),
        present(&payload.new_password),
    ) else {
        return Err(ApiError::bad_request(
            "Email, code and new password are required",
        ));
    };

    if !is_valid_password(new_password) {
        return Err(ApiError::bad_request(PASSWORD_RULE));
    }

    let request = match ResetRequest::find(&state.db, email, code).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            warn!(%email, "unknown reset code");
            return Err(ApiError::bad_request("Invalid or expired code"));
        }
        Err(e) => {
            error!(error = %e, "reset request lookup failed");
            return Err(ApiError::Internal);
        }
    };

    // Expired rows are left in place; the next forgot-password call
    // supersedes them.
    if reset::is_expired(request.expires_at, now) {
        warn!(%email, "expired reset code");
        return Err(ApiError::bad_request("Code has expired"));
    }

    let hash = match hash_password(new_password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(ApiError::Internal);
        }
    };

    if let Err(e) = Account::update_password(&state.db, email, &hash).await {
        error!(error = %e, "update password failed");
        return Err(ApiError::Internal);
    }

    if let Err(e) = ResetRequest::consume(&state.db, email, code).await {
        error!(error = %e, "consume reset request failed");
        return Err(ApiError::Internal);
    }

    info!(%email, "password reset");
    Ok(Json(SuccessResponse::new("Password updated successfully")))
}

#[instrument(skip(state, payload))]
pub async fn delete_account(
    State(state): State<AppState>,
    Json(payload): Json<DeleteAccountRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let (Some(email), Some(password), Some(confirm)) = (
        present(&payload.email),
        present(&payload.password),
        present(&payload.confirm_password),
    ) else {
        return Err(ApiError::bad_request(
            "Email, password and confirm password are required",
        ));
    };

    if !is_valid_password(password) || !is_valid_password(confirm) {
        return Err(ApiError::bad_request(PASSWORD_RULE));
    }
    if password != confirm {
        return Err(ApiError::bad_request(
            "Password and confirm password must match",
        ));
    }
    if !is_valid_email(email) {
        warn!(%email, "invalid email format");
        return Err(ApiError::bad_request("Invalid email format"));
    }

    let account = match Account::find_by_email(&state.db, email).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            warn!(%email, "delete for unknown account");
            return Err(ApiError::not_found("Account not found"));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal);
        }
    };

    if !verify_password(password, &account.password_hash) {
        warn!(%email, "delete with invalid password");
        return Err(ApiError::unauthorized("Invalid password"));
    }

    if let Err(e) = Account::delete(&state.db, email).await {
        error!(error = %e, "delete account failed");
        return Err(ApiError::Internal);
    }
    if let Err(e) = ResetRequest::purge_for_email(&state.db, email).await {
        error!(error = %e, "purge reset requests failed");
        return Err(ApiError::Internal);
    }

    info!(%email, "account deleted");
    Ok(Json(SuccessResponse::new("Account deleted successfully")))
}
