// src/lib.rs

use axum::{
    middleware::{self as axum_middleware, from_extractor},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::middleware::{
    auth::auth_guard,
    rbac::{Admin, RequireRole},
};

pub const BANNER: &str = concat!(
    "Sistema CRM/ERP - API funcionando! Versão ",
    env!("CARGO_PKG_VERSION")
);

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação: login é público, o resto exige token
    let auth_routes = Router::new()
        .route("/verify", get(handlers::auth::verify))
        .route("/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .route("/login", post(handlers::auth::login));

    // Usuários: token + papel admin
    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route_layer(from_extractor::<RequireRole<Admin>>())
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Clientes: token; a empresa vem do token (TenantContext)
    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route("/search", get(handlers::clients::search_clients))
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Empresas: token + papel admin
    let company_routes = Router::new()
        .route(
            "/",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/{id}",
            get(handlers::companies::get_company)
                .put(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        .route_layer(from_extractor::<RequireRole<Admin>>())
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_v1 = Router::new()
        .nest("/auth", auth_routes)
        .nest("/usuarios", user_routes)
        .nest("/clientes", client_routes)
        .nest("/empresas", company_routes);

    // Combina tudo no router principal
    Router::new()
        .route("/", get(|| async { BANNER }))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1", api_v1)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
