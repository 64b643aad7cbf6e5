// src/common/error.rs

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Todos os erros da aplicação terminam aqui e viram exatamente uma resposta HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Erro de validação")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    DuplicateKey(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido ou expirado")]
    InvalidToken,

    #[error("Autorização requerida")]
    MissingAuthorization,

    #[error("Formato de autorização inválido")]
    MalformedAuthorization,

    #[error("{0}")]
    Forbidden(String),

    #[error("Operação não permitida: registro pertence a outra empresa")]
    CrossTenantViolation,

    #[error("{0}")]
    NotFound(String),

    // Variante genérica para qualquer outro erro inesperado (ex: lock envenenado)
    #[error("Erro interno do servidor: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ValidationErrors(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::MissingAuthorization
            | AppError::MalformedAuthorization => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::CrossTenantViolation => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Bcrypt(_) | AppError::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub(crate) fn lock_poisoned(resource: &str) -> Self {
        AppError::Internal(anyhow::anyhow!("lock do repositório de {} envenenado", resource))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            // Retorna os detalhes de cada campo inválido
            AppError::ValidationErrors(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            ref e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                // O detalhe fica no log, o cliente recebe só a mensagem genérica.
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "error": "Ocorreu um erro inesperado." })
            }
            e => json!({ "error": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
