// src/services/token.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Identity},
};

/// Emite e valida tokens HS256. O segredo é injetado, nunca global.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expirou, acabou: sem tolerância de relógio.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn issue_token(&self, identity: &Identity) -> Result<String, AppError> {
        let expires_at = Utc::now() + self.ttl;

        let claims = Claims {
            id: identity.id,
            email: identity.email.clone(),
            tipo: identity.role.clone(),
            empresa: identity.tenant_id,
            // Antes de 1970 não existe: um TTL negativo gera um token já vencido.
            exp: expires_at.timestamp().max(0) as u64,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn validate_token(&self, token: &str) -> Result<Identity, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token rejeitado: {}", e);
                AppError::InvalidToken
            })?;

        let claims = token_data.claims;
        if claims.email.trim().is_empty() || claims.tipo.trim().is_empty() {
            tracing::debug!("Token sem email ou tipo");
            return Err(AppError::InvalidToken);
        }

        Ok(Identity {
            id: claims.id,
            email: claims.email,
            role: claims.tipo,
            tenant_id: claims.empresa,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity(tenant_id: Option<i64>) -> Identity {
        Identity {
            id: 7,
            email: "a@x.com".into(),
            role: "admin".into(),
            tenant_id,
        }
    }

    #[test]
    fn round_trip_preserves_identity() {
        let service = TokenService::new("segredo-de-teste", Duration::hours(24));
        for tenant in [Some(3), None] {
            let token = service.issue_token(&identity(tenant)).unwrap();
            assert_eq!(service.validate_token(&token).unwrap(), identity(tenant));
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new("segredo-de-teste", Duration::hours(-1));
        let token = service.issue_token(&identity(Some(1))).unwrap();
        assert!(matches!(
            service.validate_token(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenService::new("outro-segredo", Duration::hours(1));
        let verifier = TokenService::new("segredo-de-teste", Duration::hours(1));
        let token = issuer.issue_token(&identity(Some(1))).unwrap();
        assert!(matches!(
            verifier.validate_token(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn tampered_or_garbage_token_is_rejected() {
        let service = TokenService::new("segredo-de-teste", Duration::hours(1));
        let token = service.issue_token(&identity(Some(1))).unwrap();
        let tampered = format!("{}x", token);
        assert!(service.validate_token(&tampered).is_err());
        assert!(service.validate_token("nao.e.jwt").is_err());
        assert!(service.validate_token("").is_err());
    }

    #[test]
    fn claim_with_wrong_type_is_rejected() {
        let service = TokenService::new("segredo-de-teste", Duration::hours(1));
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let claims = json!({ "id": "sete", "email": "a@x.com", "tipo": "admin", "exp": exp });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"segredo-de-teste"),
        )
        .unwrap();
        assert!(matches!(
            service.validate_token(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn missing_role_claim_is_rejected() {
        let service = TokenService::new("segredo-de-teste", Duration::hours(1));
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let claims = json!({ "id": 1, "email": "a@x.com", "exp": exp });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"segredo-de-teste"),
        )
        .unwrap();
        assert!(service.validate_token(&token).is_err());
    }
}
