// src/handlers/companies.rs
//
// Apenas administradores chegam aqui (RequireRole<Admin> em `build_router`).

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
    models::company::{Company, CompanyPayload},
};

// GET /api/v1/empresas
#[utoipa::path(
    get,
    path = "/api/v1/empresas",
    tag = "Companies",
    params(ListQuery),
    responses(
        (status = 200, description = "Lista de empresas", body = Vec<Company>),
        (status = 403, description = "Requer papel admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.company_repo.list(query.page())?))
}

// GET /api/v1/empresas/{id}
#[utoipa::path(
    get,
    path = "/api/v1/empresas/{id}",
    tag = "Companies",
    params(("id" = i64, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.company_repo.get_by_id(id)?))
}

// POST /api/v1/empresas
#[utoipa::path(
    post,
    path = "/api/v1/empresas",
    tag = "Companies",
    request_body = CompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = app_state.company_repo.create(payload.into_company(0))?;
    tracing::info!("Empresa {} criada (ID: {})", company.nome, company.id);

    Ok((StatusCode::CREATED, Json(company)))
}

// PUT /api/v1/empresas/{id}
#[utoipa::path(
    put,
    path = "/api/v1/empresas/{id}",
    tag = "Companies",
    params(("id" = i64, Path, description = "ID da empresa")),
    request_body = CompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 404, description = "Empresa não encontrada"),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<CompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let existing = app_state.company_repo.get_by_id(id)?;
    Ok(Json(app_state.company_repo.update(payload.apply_to(existing))?))
}

// DELETE /api/v1/empresas/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/empresas/{id}",
    tag = "Companies",
    params(("id" = i64, Path, description = "ID da empresa")),
    responses(
        (status = 204, description = "Empresa removida"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.company_repo.delete(id)?;
    tracing::info!("Empresa {} removida", id);
    Ok(StatusCode::NO_CONTENT)
}
