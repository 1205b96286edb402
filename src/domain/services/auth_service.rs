use std::sync::Arc;
use crate::domain::{
    models::{session::{Session, SessionClaims}, user::User},
    ports::{SessionRepository, UserRepository},
};
use crate::error::AppError;
use crate::config::Config;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use uuid::Uuid;
use chrono::{DateTime, Utc, Duration};
use sha2::{Sha256, Digest};
use tracing::{debug, error};

pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct AuthService {
    session_repo: Arc<dyn SessionRepository>,
    user_repo: Arc<dyn UserRepository>,
    session_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(session_repo: Arc<dyn SessionRepository>, user_repo: Arc<dyn UserRepository>, config: &Config) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            session_repo,
            user_repo,
            session_ttl: Duration::hours(config.session_ttl_hours),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Checks the credentials and opens a session. Unknown email and wrong
    /// password are reported the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, IssuedSession), AppError> {
        let user = self.user_repo.find_by_email(email).await?
            .ok_or(AppError::Unauthorized)?;

        verify_password(password, &user.password_hash)?;

        let issued = self.issue_session(&user).await?;
        Ok((user, issued))
    }

    async fn issue_session(&self, user: &User) -> Result<IssuedSession, AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_ttl;
        let session_id = Uuid::new_v4().to_string();

        let claims = SessionClaims {
            sub: user.id.clone(),
            sid: session_id.clone(),
            role: user.role.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        let session = Session {
            id: session_id,
            user_id: user.id.clone(),
            token_hash: hash_token(&token),
            expires_at,
            created_at: now,
        };
        self.session_repo.create(&session).await?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Resolves a bearer token to its user: signature, session row, expiry, user.
    pub async fn validate_session(&self, token: &str) -> Result<User, AppError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized
            })?
            .claims;

        let token_hash = hash_token(token);
        let session = self.session_repo.find_by_token_hash(&token_hash).await?
            .ok_or(AppError::Unauthorized)?;

        if session.expires_at < Utc::now() {
            self.session_repo.delete_by_token_hash(&token_hash).await?;
            return Err(AppError::Unauthorized);
        }

        if session.id != claims.sid || session.user_id != claims.sub {
            return Err(AppError::Unauthorized);
        }

        self.user_repo.find_by_id(&session.user_id).await?
            .ok_or(AppError::Unauthorized)
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.session_repo.delete_by_token_hash(&hash_token(token)).await
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(verify_password("s3cret-pass", &hash).is_ok());
        assert!(matches!(verify_password("wrong", &hash), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_hash_is_stable_hex() {
        let a = hash_token("abc");
        assert_eq!(a, hash_token("abc"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_token("abd"));
    }
}
