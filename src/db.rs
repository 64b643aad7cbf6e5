// src/db.rs
//
// Um trait por recurso. A implementação em memória é a única deste crate;
// uma implementação durável entra pelo mesmo trait via `AppState`.

use chrono::{DateTime, Utc};

use crate::{
    common::{error::AppError, pagination::Page},
    models::{client::Client, company::Company, user::User},
};

pub mod memory;
pub mod client_repo;
pub mod company_repo;
pub mod user_repo;

pub use client_repo::InMemoryClientRepository;
pub use company_repo::InMemoryCompanyRepository;
pub use user_repo::InMemoryUserRepository;

pub trait UserRepository: Send + Sync {
    fn create(&self, user: User) -> Result<User, AppError>;
    fn get_by_id(&self, id: i64) -> Result<User, AppError>;
    fn get_by_email(&self, email: &str) -> Result<User, AppError>;
    fn update(&self, user: User) -> Result<User, AppError>;
    fn delete(&self, id: i64) -> Result<(), AppError>;
    fn list(&self, page: Page) -> Result<Vec<User>, AppError>;

    /// Quantos usuários estão vinculados à empresa (para a quota `max_usuarios`).
    fn count_by_company(&self, empresa_id: i64) -> Result<usize, AppError>;

    fn touch_last_access(&self, id: i64, at: DateTime<Utc>) -> Result<(), AppError>;
}

/// Toda operação recebe a empresa do solicitante explicitamente.
pub trait ClientRepository: Send + Sync {
    fn create(&self, client: Client) -> Result<Client, AppError>;
    fn get_by_id(&self, id: i64, empresa_id: i64) -> Result<Client, AppError>;
    fn update(&self, client: Client) -> Result<Client, AppError>;
    fn delete(&self, id: i64, empresa_id: i64) -> Result<(), AppError>;
    fn list(&self, empresa_id: i64, page: Page) -> Result<Vec<Client>, AppError>;
    fn search(&self, empresa_id: i64, query: &str, page: Page) -> Result<Vec<Client>, AppError>;
}

pub trait CompanyRepository: Send + Sync {
    fn create(&self, company: Company) -> Result<Company, AppError>;
    fn get_by_id(&self, id: i64) -> Result<Company, AppError>;
    fn update(&self, company: Company) -> Result<Company, AppError>;
    fn delete(&self, id: i64) -> Result<(), AppError>;
    fn list(&self, page: Page) -> Result<Vec<Company>, AppError>;
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn is_blank_opt(value: Option<&str>) -> bool {
    value.map_or(true, is_blank)
}
