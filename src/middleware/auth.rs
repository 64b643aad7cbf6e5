// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::Identity};

const BEARER_SCHEME: &str = "Bearer";

/// Lê `Authorization: Bearer <token>` e devolve só o token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingAuthorization)?;

    let value = value
        .to_str()
        .map_err(|_| AppError::MalformedAuthorization)?;

    match value.split_once(' ') {
        Some((BEARER_SCHEME, token)) => Ok(token),
        _ => Err(AppError::MalformedAuthorization),
    }
}

// O middleware em si: valida o token e coloca a Identity nos "extensions"
// desta requisição. Nada fica em estado global.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match bearer_token(request.headers()) {
        Ok(token) => app_state.auth_service.tokens().validate_token(token),
        Err(e) => Err(e),
    };

    let identity = identity.inspect_err(|e| {
        tracing::debug!("Acesso negado em {}: {}", request.uri().path(), e);
    })?;

    tracing::debug!("Usuário autenticado: {} (ID: {})", identity.email, identity.id);

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::MissingAuthorization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()).unwrap_err(),
            AppError::MissingAuthorization
        ));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        for value in ["Basic abc", "bearer abc", "Bearer", "abc"] {
            assert!(
                matches!(bearer_token(&headers(value)).unwrap_err(), AppError::MalformedAuthorization),
                "{value}"
            );
        }
    }

    #[test]
    fn extracts_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }
}
