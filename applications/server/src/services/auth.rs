/// Authentication service - JWT issuing and verification
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use musify_core::{Identity, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub admin: bool,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl AuthService {
    pub fn new(secret: String, expiration_hours: u64) -> Self {
        let hours = i64::try_from(expiration_hours).unwrap_or(i64::MAX / 3_600_000);
        Self {
            secret,
            token_expiration: Duration::hours(hours),
        }
    }

    /// Issue a token carrying the identity's id, email and admin claim
    pub fn issue_token(&self, identity: &Identity) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_expiration;

        let claims = Claims {
            sub: identity.user_id.as_str().to_string(),
            email: identity.email.clone(),
            admin: identity.is_admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and resolve the caller identity
    pub fn resolve_identity(&self, token: &str) -> Result<Identity> {
        let claims = self.verify_token(token)?;
        if claims.sub.trim().is_empty() {
            return Err(ServerError::Auth("Token has no subject".to_string()));
        }

        Ok(Identity {
            user_id: UserId::new(claims.sub),
            email: claims.email,
            is_admin: claims.admin,
        })
    }
}
