// src/handlers/clients.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::AppJson,
        pagination::{ListQuery, SearchQuery},
    },
    config::AppState,
    middleware::tenancy::TenantContext,
    models::client::{Client, ClientPayload},
};

// GET /api/v1/clientes
#[utoipa::path(
    get,
    path = "/api/v1/clientes",
    tag = "Clients",
    params(ListQuery),
    responses(
        (status = 200, description = "Clientes da empresa do usuário", body = Vec<Client>),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_repo.list(tenant.0, query.page())?;
    Ok(Json(clients))
}

// GET /api/v1/clientes/search?q=
#[utoipa::path(
    get,
    path = "/api/v1/clientes/search",
    tag = "Clients",
    params(SearchQuery),
    responses(
        (status = 200, description = "Clientes encontrados", body = Vec<Client>),
        (status = 400, description = "Parâmetro 'q' ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn search_clients(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Parâmetro de busca 'q' é obrigatório".into()))?;

    let clients = app_state.client_repo.search(tenant.0, term, query.page())?;
    Ok(Json(clients))
}

// GET /api/v1/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/v1/clientes/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.client_repo.get_by_id(id, tenant.0)?))
}

// POST /api/v1/clientes
#[utoipa::path(
    post,
    path = "/api/v1/clientes",
    tag = "Clients",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    AppJson(payload): AppJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // A empresa do cliente é sempre a do token.
    let client = app_state
        .client_repo
        .create(payload.into_client(0, tenant.0))?;

    tracing::info!("Cliente {} criado na empresa {}", client.id, client.empresa_id);
    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/v1/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/v1/clientes/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 403, description = "Cliente pertence a outra empresa"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_repo
        .update(payload.into_client(id, tenant.0))?;

    Ok(Json(client))
}

// DELETE /api/v1/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/clientes/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 403, description = "Cliente pertence a outra empresa"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.client_repo.delete(id, tenant.0)?;
    tracing::info!("Cliente {} removido da empresa {}", id, tenant.0);
    Ok(StatusCode::NO_CONTENT)
}
