use crate::dto::token_dto::{TokenClaimsDto, TokenKind, TokenReadDto};
use crate::error::token_error::TokenError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const ISSUER: &str = "keygate";

// 256 bits minimum for HS256
const MIN_SECRET_BYTES: usize = 32;

/// Stateless token issuer. Holds the process-wide signing secret and the two
/// fixed lifetimes; possession of a valid signature plus an unexpired
/// timestamp is the entire verification story.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_ttl_minutes: i64,
    refresh_ttl_days: i64,
}

pub trait TokenServiceTrait {
    fn new(secret: String, access_ttl_minutes: i64, refresh_ttl_days: i64) -> Result<Self, TokenError>
    where
        Self: Sized;
    fn create_access_token(&self, username: &str) -> Result<TokenReadDto, TokenError>;
    fn create_refresh_token(&self, username: &str) -> Result<TokenReadDto, TokenError>;
    fn verify(&self, token: &str) -> Result<TokenClaimsDto, TokenError>;
    fn hash_refresh_token(&self, token: &str) -> String;
}

impl TokenServiceTrait for TokenService {
    fn new(secret: String, access_ttl_minutes: i64, refresh_ttl_days: i64) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::Creation(format!(
                "JWT secret must be at least {} bytes, current length: {}",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            access_ttl_minutes,
            refresh_ttl_days,
        })
    }

    fn create_access_token(&self, username: &str) -> Result<TokenReadDto, TokenError> {
        self.mint(username, Duration::minutes(self.access_ttl_minutes), TokenKind::Access)
    }

    fn create_refresh_token(&self, username: &str) -> Result<TokenReadDto, TokenError> {
        self.mint(username, Duration::days(self.refresh_ttl_days), TokenKind::Refresh)
    }

    fn verify(&self, token: &str) -> Result<TokenClaimsDto, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 seconds leeway for clock skew

        decode::<TokenClaimsDto>(token, &DecodingKey::from_secret(self.secret.as_ref()), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            })
    }

    /// SHA-256 hex of a refresh token, the only form ever persisted.
    fn hash_refresh_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.finalize().iter().map(|byte| format!("{:02x}", byte)).collect()
    }
}

impl TokenService {
    fn mint(&self, username: &str, lifetime: Duration, kind: TokenKind) -> Result<TokenReadDto, TokenError> {
        let now = Utc::now();
        let iat = now.timestamp();
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| TokenError::Creation("Token expiration calculation overflow".to_string()))?
            .timestamp();

        let claims = TokenClaimsDto {
            sub: username.to_string(),
            iat,
            exp,
            iss: ISSUER.to_string(),
            jti: Uuid::now_v7().to_string(),
            kind,
        };

        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_ref()))
            .map_err(|e| TokenError::Creation(e.to_string()))?;

        Ok(TokenReadDto { token, iat, exp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-with-at-least-32-bytes!!";

    fn service() -> TokenService {
        TokenService::new(SECRET.to_string(), 15, 7).unwrap()
    }

    #[test]
    fn test_rejects_short_secret() {
        let result = TokenService::new("too-short".to_string(), 15, 7);
        assert!(matches!(result, Err(TokenError::Creation(_))));
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = service();
        let issued = service.create_access_token("alice").unwrap();

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp, issued.exp);
    }

    #[test]
    fn test_refresh_token_carries_refresh_kind() {
        let service = service();
        let issued = service.create_refresh_token("alice").unwrap();

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let service = service();
        let access = service.create_access_token("alice").unwrap();
        let refresh = service.create_refresh_token("alice").unwrap();

        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_expired_token_fails_with_expired() {
        // A negative lifetime puts exp in the past, beyond the 30s leeway.
        let service = TokenService::new(SECRET.to_string(), -5, 7).unwrap();
        let issued = service.create_access_token("alice").unwrap();

        let result = service.verify(&issued.token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_fails_with_invalid_signature() {
        let issued = service().create_access_token("alice").unwrap();

        let other =
            TokenService::new("another-secret-with-at-least-32-bytes".to_string(), 15, 7).unwrap();
        let result = other.verify(&issued.token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_tampered_token_fails_with_invalid_signature() {
        let service = service();
        let issued = service.create_access_token("alice").unwrap();

        let mut tampered = issued.token.clone();
        tampered.pop();
        tampered.push('x');

        let result = service.verify(&tampered);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_fails_with_invalid_signature() {
        let result = service().verify("not-a-token");
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_tokens_carry_unique_jti() {
        let service = service();
        let first = service.create_access_token("alice").unwrap();
        let second = service.create_access_token("alice").unwrap();

        let first_claims = service.verify(&first.token).unwrap();
        let second_claims = service.verify(&second.token).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }

    #[test]
    fn test_hash_refresh_token_is_deterministic_hex() {
        let service = service();
        let hash1 = service.hash_refresh_token("some-token");
        let hash2 = service.hash_refresh_token("some-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit()));

        assert_ne!(hash1, service.hash_refresh_token("other-token"));
    }
}
