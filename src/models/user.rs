// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_ROLE: &str = "cliente";

// Representa um usuário do sistema
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,

    // Hash bcrypt. Nunca sai na resposta.
    #[serde(skip_serializing)]
    pub senha: String,

    pub ultimo_acesso: Option<DateTime<Utc>>,
    pub status: bool,
    pub data_criacao: DateTime<Utc>,

    #[schema(example = "admin")]
    pub tipo: String, // "admin", "cliente", etc.

    pub empresa_id: Option<i64>,
}

// Corpo de POST /usuarios e PUT /usuarios/{id}
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@empresa.com")]
    pub email: String,

    // Obrigatória na criação; na atualização, ausente mantém a senha atual.
    pub senha: Option<String>,

    pub tipo: Option<String>,

    // Ausente = ativo
    pub status: Option<bool>,

    pub empresa_id: Option<i64>,
}

impl UserPayload {
    /// Monta o registro com a senha já transformada em hash.
    /// `id` e `data_criacao` são definidos pelo repositório.
    pub fn into_user(self, id: i64, senha_hash: String) -> User {
        User {
            id,
            nome: self.nome,
            email: self.email,
            senha: senha_hash,
            ultimo_acesso: None,
            status: self.status.unwrap_or(true),
            data_criacao: Utc::now(),
            tipo: self
                .tipo
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            empresa_id: self.empresa_id,
        }
    }

    /// PUT: campos ausentes mantêm o valor atual do usuário.
    /// `senha_hash` vazio mantém a senha atual.
    pub fn apply_to(self, existing: User, senha_hash: String) -> User {
        User {
            id: existing.id,
            nome: self.nome,
            email: self.email,
            senha: if senha_hash.is_empty() {
                existing.senha
            } else {
                senha_hash
            },
            ultimo_acesso: existing.ultimo_acesso,
            status: self.status.unwrap_or(existing.status),
            data_criacao: existing.data_criacao,
            tipo: self
                .tipo
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(existing.tipo),
            empresa_id: self.empresa_id.or(existing.empresa_id),
        }
    }
}
