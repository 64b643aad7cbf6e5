// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, models::auth::Identity};

// A empresa (tenant) do solicitante, tirada do token. Nunca do corpo nem de
// cabeçalhos controlados pelo cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext(pub i64);

impl TenantContext {
    /// Token sem `empresa` não dá acesso a dados de tenant: não existe
    /// empresa padrão.
    pub fn from_identity(identity: &Identity) -> Result<Self, AppError> {
        match identity.tenant_id {
            Some(id) if id > 0 => Ok(TenantContext(id)),
            _ => Err(AppError::Forbidden(
                "Usuário não está vinculado a nenhuma empresa".to_string(),
            )),
        }
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .ok_or(AppError::MissingAuthorization)?;

        TenantContext::from_identity(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(tenant_id: Option<i64>) -> Identity {
        Identity {
            id: 1,
            email: "a@x.com".into(),
            role: "cliente".into(),
            tenant_id,
        }
    }

    #[test]
    fn uses_token_tenant() {
        assert_eq!(TenantContext::from_identity(&identity(Some(4))).unwrap(), TenantContext(4));
    }

    #[test]
    fn no_tenant_is_forbidden_not_defaulted() {
        assert!(matches!(
            TenantContext::from_identity(&identity(None)).unwrap_err(),
            AppError::Forbidden(_)
        ));
    }
}
