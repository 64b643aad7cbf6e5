// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::Identity};

/// Valor de papel que libera qualquer usuário autenticado.
pub const ANY_ROLE: &str = "any";

/// 1. O Trait que define qual papel uma rota exige
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> &'static str;
}

pub fn check_role(identity: &Identity, required: &str) -> Result<(), AppError> {
    if required == ANY_ROLE || identity.role == required {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "Acesso negado: é necessário o papel '{}'",
        required
    )))
}

/// 2. O Extractor (Guardião). Exige que `auth_guard` já tenha rodado.
pub struct RequireRole<R>(pub PhantomData<R>);

impl<R, S> FromRequestParts<S> for RequireRole<R>
where
    R: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>().ok_or_else(|| {
            tracing::debug!("Usuário não autenticado em rota restrita: {}", parts.uri.path());
            AppError::MissingAuthorization
        })?;

        check_role(identity, R::role()).inspect_err(|_| {
            tracing::debug!(
                "Usuário {} com papel {} tentou acessar recurso que exige {}",
                identity.email,
                identity.role,
                R::role()
            );
        })?;

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct Admin;
impl RoleDef for Admin {
    fn role() -> &'static str { "admin" }
}

pub struct AnyRole;
impl RoleDef for AnyRole {
    fn role() -> &'static str { ANY_ROLE }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: &str) -> Identity {
        Identity {
            id: 1,
            email: "a@x.com".into(),
            role: role.into(),
            tenant_id: Some(1),
        }
    }

    #[test]
    fn matching_role_passes() {
        assert!(check_role(&identity("admin"), "admin").is_ok());
    }

    #[test]
    fn other_role_is_forbidden() {
        assert!(matches!(
            check_role(&identity("cliente"), "admin").unwrap_err(),
            AppError::Forbidden(_)
        ));
    }

    #[test]
    fn wildcard_bypasses() {
        assert!(check_role(&identity("cliente"), AnyRole::role()).is_ok());
    }
}
