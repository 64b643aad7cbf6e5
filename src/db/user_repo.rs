// src/db/user_repo.rs

use chrono::{DateTime, Utc};

use crate::{
    common::{error::AppError, pagination::Page},
    db::{is_blank, memory::MemoryTable, UserRepository},
    models::user::User,
};

// O repositório de usuários em memória
#[derive(Debug)]
pub struct InMemoryUserRepository {
    table: MemoryTable<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("usuários"),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(user: &User) -> Result<(), AppError> {
    if is_blank(&user.nome) || is_blank(&user.email) {
        return Err(AppError::Validation("nome e email são obrigatórios".into()));
    }
    Ok(())
}

// Emails são comparados e guardados sem caixa nem espaços nas pontas.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn not_found() -> AppError {
    AppError::NotFound("usuário não encontrado".into())
}

impl UserRepository for InMemoryUserRepository {
    fn create(&self, mut user: User) -> Result<User, AppError> {
        validate(&user)?;
        user.email = normalize_email(&user.email);

        let mut table = self.table.write()?;

        if table.records.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateKey("email já está em uso".into()));
        }

        user.id = table.issue_id();
        user.data_criacao = Utc::now();
        user.ultimo_acesso = None;

        table.records.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        let table = self.table.read()?;
        table.records.get(&id).cloned().ok_or_else(not_found)
    }

    fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        let table = self.table.read()?;
        table
            .records
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(not_found)
    }

    fn update(&self, mut user: User) -> Result<User, AppError> {
        let mut table = self.table.write()?;

        let existing = table.records.get(&user.id).ok_or_else(not_found)?;

        validate(&user)?;
        user.email = normalize_email(&user.email);

        if table
            .records
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(AppError::DuplicateKey("email já está em uso".into()));
        }

        // Campos controlados pelo servidor
        user.data_criacao = existing.data_criacao;
        user.ultimo_acesso = existing.ultimo_acesso;
        if user.senha.is_empty() {
            user.senha = existing.senha.clone();
        }

        table.records.insert(user.id, user.clone());
        Ok(user)
    }

    fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.table.write()?;
        table.records.remove(&id).map(|_| ()).ok_or_else(not_found)
    }

    fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        let table = self.table.read()?;
        Ok(page.apply(table.records.values().cloned()))
    }

    fn count_by_company(&self, empresa_id: i64) -> Result<usize, AppError> {
        let table = self.table.read()?;
        Ok(table
            .records
            .values()
            .filter(|u| u.empresa_id == Some(empresa_id))
            .count())
    }

    fn touch_last_access(&self, id: i64, at: DateTime<Utc>) -> Result<(), AppError> {
        let mut table = self.table.write()?;
        let user = table.records.get_mut(&id).ok_or_else(not_found)?;
        user.ultimo_acesso = Some(at);
        Ok(())
    }
}
