//! # Authentication & Crypto
//!
//! Password hashing, JWT issuing/validation, bearer extraction and the phone
//! number cipher.
//!
//! ## Credential Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  passwords      Argon2id, PHC string at rest, never reversible          │
//! │  sessions       JWT HS256, claims {sub, role, iat, exp}                 │
//! │  phone numbers  AES-256-GCM, base64(nonce || ciphertext) at rest,       │
//! │                 decrypted only for display                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use argon2::password_hash::rand_core::OsRng as PwOsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use veggie_core::{Role, User};

use crate::config::ConfigError;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with Argon2id, returning the PHC string
/// (`$argon2id$v=19$...`). Salt is random per call.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut PwOsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string. An unparseable hash
/// counts as a failed verification, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// =============================================================================
// JWT
// =============================================================================

/// JWT claims. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256 tokens.
#[derive(Clone)]
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issues a token for the user, expiring after the configured TTL.
    pub fn issue(&self, user: &User) -> ApiResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))
    }

    /// Validates signature and expiry. Expired and tampered tokens are not
    /// distinguished in the response.
    pub fn validate(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

// =============================================================================
// Request Authentication
// =============================================================================

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn extract_bearer_token(req: &HttpRequest) -> ApiResult<&str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header".to_string()))
}

/// Resolves the calling user: bearer token, claims, then a live account
/// lookup so deleted accounts lose access immediately.
pub async fn current_user(req: &HttpRequest, state: &AppState) -> ApiResult<User> {
    let token = extract_bearer_token(req)?;
    let claims = state.jwt.validate(token)?;
    state
        .db
        .users()
        .find_by_id(claims.sub)
        .await
        .map_err(|_| ApiError::Unauthorized("Token subject no longer exists".to_string()))
}

/// Role check. Pure predicate, no hierarchy.
pub fn authorize(user: &User, allowed: &[Role]) -> ApiResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Insufficient permissions".to_string(),
        ))
    }
}

// =============================================================================
// Phone Number Cipher
// =============================================================================

/// AES-256-GCM cipher for contact numbers. Stored form is
/// base64(nonce || ciphertext), nonce is 12 random bytes per encryption.
#[derive(Clone)]
pub struct PhoneCipher {
    cipher: Aes256Gcm,
}

impl PhoneCipher {
    /// Builds the cipher from a 64-hex-char (32 byte) key.
    pub fn from_hex_key(hex_key: &str) -> Result<Self, ConfigError> {
        let bytes = hex::decode(hex_key).map_err(|e| ConfigError::Invalid {
            name: "PHONE_KEY",
            reason: e.to_string(),
        })?;
        if bytes.len() != 32 {
            return Err(ConfigError::Invalid {
                name: "PHONE_KEY",
                reason: "must be 64 hex characters (32 bytes)".to_string(),
            });
        }
        let key = Key::<Aes256Gcm>::from_slice(&bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    pub fn encrypt(&self, plaintext: &str) -> ApiResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| ApiError::Internal("phone encryption failed".to_string()))?;

        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(B64.encode(combined))
    }

    /// Decrypts a stored value. Values that do not decrypt (rows written
    /// before encryption was introduced) come back verbatim.
    pub fn decrypt(&self, stored: &str) -> String {
        self.try_decrypt(stored)
            .unwrap_or_else(|| stored.to_string())
    }

    fn try_decrypt(&self, stored: &str) -> Option<String> {
        let combined = B64.decode(stored).ok()?;
        if combined.len() <= 12 {
            return None;
        }
        let (nonce, ciphertext) = combined.split_at(12);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .ok()?;
        String::from_utf8(plaintext).ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: 42,
            username: "suji".into(),
            password_hash: String::new(),
            role: Role::Shop,
            shop_name: Some("Suji Vegetables".into()),
            mobile_enc: None,
            created_at: Utc::now(),
        }
    }

    fn test_cipher() -> PhoneCipher {
        PhoneCipher::from_hex_key(&"ab".repeat(32)).unwrap()
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("secret-password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret-password", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_jwt_roundtrip() {
        let jwt = JwtManager::new("test-secret-0123", 3600);
        let token = jwt.issue(&test_user()).unwrap();
        let claims = jwt.validate(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Shop);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_jwt_rejects_expired_token() {
        // Issued already past expiry, beyond the default 60s leeway.
        let jwt = JwtManager::new("test-secret-0123", -120);
        let token = jwt.issue(&test_user()).unwrap();
        assert!(jwt.validate(&token).is_err());
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let issuer = JwtManager::new("secret-number-one", 3600);
        let verifier = JwtManager::new("secret-number-two", 3600);
        let token = issuer.issue(&test_user()).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req).unwrap(), "abc.def.ghi");

        let missing = TestRequest::default().to_http_request();
        assert!(extract_bearer_token(&missing).is_err());

        let wrong_scheme = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(extract_bearer_token(&wrong_scheme).is_err());
    }

    #[test]
    fn test_authorize() {
        let user = test_user();
        assert!(authorize(&user, &[Role::Shop]).is_ok());
        assert!(authorize(&user, &[Role::Admin, Role::Shop]).is_ok());
        assert!(authorize(&user, &[Role::Admin]).is_err());
    }

    #[test]
    fn test_phone_cipher_roundtrip() {
        let cipher = test_cipher();
        let stored = cipher.encrypt("9095938085").unwrap();
        assert_ne!(stored, "9095938085");
        assert_eq!(cipher.decrypt(&stored), "9095938085");
    }

    #[test]
    fn test_phone_cipher_nonces_differ() {
        let cipher = test_cipher();
        let a = cipher.encrypt("9095938085").unwrap();
        let b = cipher.encrypt("9095938085").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_decrypt_returns_legacy_values_verbatim() {
        let cipher = test_cipher();
        // Plaintext row written before encryption existed.
        assert_eq!(cipher.decrypt("9095938085"), "9095938085");
        assert_eq!(cipher.decrypt("not base64 at all!"), "not base64 at all!");
    }

    #[test]
    fn test_cipher_rejects_bad_key() {
        assert!(PhoneCipher::from_hex_key("deadbeef").is_err());
        assert!(PhoneCipher::from_hex_key("zz".repeat(32).as_str()).is_err());
    }
}
