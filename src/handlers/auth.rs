// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginPayload, LoginResponse, LogoutResponse, UserSummary},
};

// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = LoginResponse),
        (status = 400, description = "Corpo inválido"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// GET /api/v1/auth/verify
#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token válido", body = UserSummary),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn verify(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<Json<UserSummary>, AppError> {
    Ok(Json(app_state.auth_service.verify(&identity)?))
}

// POST /api/v1/auth/logout
// Não há revogação no servidor: o cliente só descarta o token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logout realizado", body = LogoutResponse),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(AuthenticatedUser(identity): AuthenticatedUser) -> Json<LogoutResponse> {
    tracing::info!("Logout de {} (ID: {})", identity.email, identity.id);
    Json(LogoutResponse { success: true })
}
