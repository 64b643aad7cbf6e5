// src/handlers/users.rs
//
// Gestão de usuários. Todas as rotas exigem token de um `admin`
// (camadas aplicadas em `build_router`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson, pagination::ListQuery},
    config::AppState,
    models::user::{User, UserPayload},
    services::password::hash_password,
};

// A empresa precisa existir e ter vaga na quota de usuários.
// Checagem sem atomicidade entre os dois repositórios.
fn ensure_company_capacity(app_state: &AppState, empresa_id: i64) -> Result<(), AppError> {
    let company = match app_state.company_repo.get_by_id(empresa_id) {
        Ok(company) => company,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Validation("empresa inválida".into()));
        }
        Err(e) => return Err(e),
    };

    let in_use = app_state.user_repo.count_by_company(empresa_id)?;
    if in_use as i64 >= company.max_usuarios {
        return Err(AppError::Validation(format!(
            "limite de {} usuários da empresa atingido",
            company.max_usuarios
        )));
    }
    Ok(())
}

// GET /api/v1/usuarios
#[utoipa::path(
    get,
    path = "/api/v1/usuarios",
    tag = "Users",
    params(ListQuery),
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<User>),
        (status = 403, description = "Requer papel admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_repo.list(query.page())?;
    Ok(Json(users))
}

// GET /api/v1/usuarios/{id}
#[utoipa::path(
    get,
    path = "/api/v1/usuarios/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.user_repo.get_by_id(id)?))
}

// POST /api/v1/usuarios
#[utoipa::path(
    post,
    path = "/api/v1/usuarios",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let senha = match payload.senha.as_deref() {
        Some(senha) if !senha.is_empty() => hash_password(senha, app_state.bcrypt_cost).await?,
        _ => return Err(AppError::Validation("senha é obrigatória".into())),
    };

    if let Some(empresa_id) = payload.empresa_id {
        ensure_company_capacity(&app_state, empresa_id)?;
    }

    let user = app_state.user_repo.create(payload.into_user(0, senha))?;
    tracing::info!("Usuário {} criado (ID: {})", user.email, user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /api/v1/usuarios/{id}
#[utoipa::path(
    put,
    path = "/api/v1/usuarios/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let existing = app_state.user_repo.get_by_id(id)?;

    // Vazio = mantém o hash atual
    let senha = match payload.senha.as_deref() {
        Some(senha) if !senha.is_empty() => hash_password(senha, app_state.bcrypt_cost).await?,
        _ => String::new(),
    };

    if let Some(empresa_id) = payload.empresa_id {
        if existing.empresa_id != Some(empresa_id) {
            ensure_company_capacity(&app_state, empresa_id)?;
        }
    }

    let user = app_state.user_repo.update(payload.apply_to(existing, senha))?;
    Ok(Json(user))
}

// DELETE /api/v1/usuarios/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/usuarios/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.user_repo.delete(id)?;
    tracing::info!("Usuário {} removido", id);
    Ok(StatusCode::NO_CONTENT)
}
