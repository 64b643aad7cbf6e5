// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_PLAN: &str = "básico";
pub const DEFAULT_MAX_USERS: i64 = 5;
pub const DEFAULT_MODULES: [&str; 2] = ["clientes", "financeiro"];

// Empresa = tenant. O CNPJ é único entre todas as empresas.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Company {
    pub id: i64,
    pub nome: String,
    pub cnpj: String,
    pub endereco: String,
    pub telefone: String,
    pub email: String,
    pub status: bool,
    pub data_criacao: DateTime<Utc>,

    #[schema(example = "premium")]
    pub plano: String,

    // Sempre preenchida depois da criação (padrão: 1 ano).
    pub data_expira: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    pub modulos: Vec<String>,
    pub max_usuarios: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompanyPayload {
    #[schema(example = "Padaria Central LTDA")]
    pub nome: String,

    #[schema(example = "12345678000199")]
    pub cnpj: String,

    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub telefone: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub status: Option<bool>,
    pub plano: Option<String>,
    pub data_expira: Option<DateTime<Utc>>,
    pub logo_url: Option<String>,
    pub modulos: Option<Vec<String>>,
    pub max_usuarios: Option<i64>,
}

impl CompanyPayload {
    // Os padrões de plano/módulos/quota ficam a cargo do repositório.
    pub fn into_company(self, id: i64) -> Company {
        Company {
            id,
            nome: self.nome,
            cnpj: self.cnpj,
            endereco: self.endereco,
            telefone: self.telefone,
            email: self.email,
            status: self.status.unwrap_or(true),
            data_criacao: Utc::now(),
            plano: self.plano.unwrap_or_default(),
            data_expira: self.data_expira,
            logo_url: self.logo_url,
            modulos: self.modulos.unwrap_or_default(),
            max_usuarios: self.max_usuarios.unwrap_or(0),
        }
    }

    /// PUT: campos ausentes mantêm o valor atual da empresa.
    pub fn apply_to(self, existing: Company) -> Company {
        Company {
            id: existing.id,
            nome: self.nome,
            cnpj: self.cnpj,
            endereco: self.endereco,
            telefone: self.telefone,
            email: self.email,
            status: self.status.unwrap_or(existing.status),
            data_criacao: existing.data_criacao,
            plano: self
                .plano
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(existing.plano),
            data_expira: self.data_expira.or(existing.data_expira),
            logo_url: self.logo_url.or(existing.logo_url),
            modulos: self
                .modulos
                .filter(|m| !m.is_empty())
                .unwrap_or(existing.modulos),
            max_usuarios: self
                .max_usuarios
                .filter(|&max| max > 0)
                .unwrap_or(existing.max_usuarios),
        }
    }
}
