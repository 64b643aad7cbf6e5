// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::verify,
        handlers::auth::logout,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::search_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::get_company,
        handlers::companies::create_company,
        handlers::companies::update_company,
        handlers::companies::delete_company,
    ),
    components(
        schemas(
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::LogoutResponse,
            models::auth::UserSummary,

            models::user::User,
            models::user::UserPayload,

            models::client::TipoPessoa,
            models::client::Client,
            models::client::ClientPayload,

            models::company::Company,
            models::company::CompanyPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Gestão de Usuários (admin)"),
        (name = "Clients", description = "Clientes da empresa do usuário"),
        (name = "Companies", description = "Gestão de Empresas (admin)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
