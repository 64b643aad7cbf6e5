// src/services/auth.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        auth::{Identity, LoginResponse, UserSummary},
        user::User,
    },
    services::{password::verify_password, token::TokenService},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { user_repo, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Confere email + senha de um usuário ativo e registra o último acesso.
    pub async fn check_credentials(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let user = self.authenticate(email, password).await?;
        Ok(Identity::from_user(&user))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self.authenticate(email, password).await?;
        let token = self.tokens.issue_token(&Identity::from_user(&user))?;

        tracing::info!("Login de {} (ID: {})", user.email, user.id);

        Ok(LoginResponse {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Dados atuais do usuário dono do token. Usuário removido ou inativo
    /// invalida o token.
    pub fn verify(&self, identity: &Identity) -> Result<UserSummary, AppError> {
        let user = match self.user_repo.get_by_id(identity.id) {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(AppError::InvalidToken),
            Err(e) => return Err(e),
        };

        if !user.status {
            return Err(AppError::InvalidToken);
        }

        let mut summary = UserSummary::from(&user);
        // O token é a fonte da empresa durante a sessão.
        summary.tenant_id = identity.tenant_id;
        Ok(summary)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = match self.user_repo.get_by_email(email) {
            Ok(user) if user.status => user,
            Ok(_) | Err(AppError::NotFound(_)) => return Err(AppError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if !verify_password(password, &user.senha).await? {
            return Err(AppError::InvalidCredentials);
        }

        let now = Utc::now();
        self.user_repo.touch_last_access(user.id, now)?;

        Ok(User {
            ultimo_acesso: Some(now),
            ..user
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::InMemoryUserRepository, services::password::hash_password};

    async fn service_with_user(status: bool) -> (AuthService, Arc<InMemoryUserRepository>, i64) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = repo
            .create(User {
                id: 0,
                nome: "Ana".into(),
                email: "a@x.com".into(),
                senha: hash_password("secret", 4).await.unwrap(),
                ultimo_acesso: None,
                status,
                data_criacao: Utc::now(),
                tipo: "admin".into(),
                empresa_id: Some(2),
            })
            .unwrap();
        let tokens = TokenService::new("segredo-de-teste", chrono::Duration::hours(24));
        (AuthService::new(repo.clone(), tokens), repo, user.id)
    }

    #[tokio::test]
    async fn valid_credentials_update_last_access() {
        let (service, repo, id) = service_with_user(true).await;
        let identity = service.check_credentials("a@x.com", "secret").await.unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.tenant_id, Some(2));
        assert!(repo.get_by_id(id).unwrap().ultimo_acesso.is_some());
    }

    #[tokio::test]
    async fn wrong_password_or_unknown_email_fail() {
        let (service, repo, id) = service_with_user(true).await;
        assert!(matches!(
            service.check_credentials("a@x.com", "wrong").await.unwrap_err(),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            service.check_credentials("b@x.com", "secret").await.unwrap_err(),
            AppError::InvalidCredentials
        ));
        assert!(repo.get_by_id(id).unwrap().ultimo_acesso.is_none());
    }

    #[tokio::test]
    async fn inactive_user_cannot_log_in() {
        let (service, _, _) = service_with_user(false).await;
        assert!(matches!(
            service.login("a@x.com", "secret").await.unwrap_err(),
            AppError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn login_token_decodes_to_the_user() {
        let (service, _, id) = service_with_user(true).await;
        let response = service.login("a@x.com", "secret").await.unwrap();
        assert_eq!(response.user.email, "a@x.com");
        let identity = service.tokens().validate_token(&response.token).unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.role, "admin");
        assert_eq!(service.verify(&identity).unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn verify_rejects_deleted_user() {
        let (service, repo, id) = service_with_user(true).await;
        let identity = service.check_credentials("a@x.com", "secret").await.unwrap();
        repo.delete(id).unwrap();
        assert!(matches!(service.verify(&identity).unwrap_err(), AppError::InvalidToken));
    }
}
