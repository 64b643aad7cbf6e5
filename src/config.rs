// src/config.rs

use std::{env, sync::Arc};

use anyhow::{bail, Context};
use chrono::TimeDelta;

use crate::{
    db::{
        ClientRepository, CompanyRepository, InMemoryClientRepository,
        InMemoryCompanyRepository, InMemoryUserRepository, UserRepository,
    },
    models::user::{User, UserPayload},
    services::{password::hash_password, AuthService, TokenService},
};

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

// Fora do intervalo do chrono ou não positivo = erro de configuração.
fn token_ttl_from_hours(hours: i64) -> anyhow::Result<TimeDelta> {
    if hours <= 0 {
        bail!("TOKEN_TTL_HOURS deve ser positivo: {hours}");
    }
    TimeDelta::try_hours(hours)
        .with_context(|| format!("TOKEN_TTL_HOURS fora do intervalo suportado: {hours}"))
}

/// Administrador criado na subida quando ADMIN_EMAIL e ADMIN_PASSWORD existem.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub jwt_secret: String,
    pub token_ttl: TimeDelta,
    pub bcrypt_cost: u32,
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Sem segredo padrão: um segredo embutido no código é um defeito.
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET não pode ser vazio");
        }

        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());

        let token_ttl_hours = match env::var("TOKEN_TTL_HOURS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("TOKEN_TTL_HOURS inválido: {value}"))?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };
        let token_ttl = token_ttl_from_hours(token_ttl_hours)?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("BCRYPT_COST inválido: {value}"))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed {
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server_addr,
            jwt_secret,
            token_ttl,
            bcrypt_cost,
            admin,
        })
    }

    /// Configuração para testes: custo mínimo do bcrypt, sem admin.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            jwt_secret: jwt_secret.to_string(),
            token_ttl: TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: 4,
            admin: None,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_repo: Arc<dyn UserRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub bcrypt_cost: u32,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(config: &AppConfig) -> Self {
        Self::with_repositories(
            config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryClientRepository::new()),
            Arc::new(InMemoryCompanyRepository::new()),
        )
    }

    /// Permite trocar a implementação dos repositórios (ex: uma durável).
    pub fn with_repositories(
        config: &AppConfig,
        user_repo: Arc<dyn UserRepository>,
        client_repo: Arc<dyn ClientRepository>,
        company_repo: Arc<dyn CompanyRepository>,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl);
        let auth_service = AuthService::new(user_repo.clone(), tokens);

        Self {
            auth_service,
            user_repo,
            client_repo,
            company_repo,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Cria o administrador configurado, se ainda não existir.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> anyhow::Result<Option<User>> {
        if self.user_repo.get_by_email(&seed.email).is_ok() {
            tracing::info!("Administrador {} já existe", seed.email);
            return Ok(None);
        }

        let senha = hash_password(&seed.password, self.bcrypt_cost).await?;
        let payload = UserPayload {
            nome: seed.name.clone(),
            email: seed.email.clone(),
            senha: None,
            tipo: Some("admin".to_string()),
            status: Some(true),
            empresa_id: None,
        };
        let admin = self.user_repo.create(payload.into_user(0, senha))?;

        tracing::info!("✅ Administrador {} criado (ID: {})", admin.email, admin.id);
        Ok(Some(admin))
    }
}
