// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoPessoa {
    Fisica,
    Juridica,
}

// Cliente de uma empresa (tenant). `empresa_id` nunca muda depois da criação.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Client {
    pub id: i64,
    pub nome: String,
    pub tipo_pessoa: TipoPessoa,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,

    pub email: String,
    pub telefone: String,
    pub endereco: String,
    pub status: bool,
    pub data_criacao: DateTime<Utc>,
    pub empresa_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultima_compra: Option<DateTime<Utc>>,
}

// Corpo de POST /clientes e PUT /clientes/{id}.
// Não existe `empresa_id` aqui: a empresa sempre vem do token.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClientPayload {
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[schema(example = "fisica")]
    pub tipo_pessoa: TipoPessoa,

    #[schema(example = "12345678900")]
    pub cpf: Option<String>,
    pub cnpj: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub endereco: String,

    pub status: Option<bool>,
    pub observacoes: Option<String>,
    pub ultima_compra: Option<DateTime<Utc>>,
}

impl ClientPayload {
    pub fn into_client(self, id: i64, empresa_id: i64) -> Client {
        Client {
            id,
            nome: self.nome,
            tipo_pessoa: self.tipo_pessoa,
            cpf: self.cpf,
            cnpj: self.cnpj,
            email: self.email,
            telefone: self.telefone,
            endereco: self.endereco,
            status: self.status.unwrap_or(true),
            data_criacao: Utc::now(),
            empresa_id,
            observacoes: self.observacoes,
            ultima_compra: self.ultima_compra,
        }
    }
}
