//! # Authentication Module
//!
//! Admin sessions for the SlotBook API. The admin password is stored as an
//! Argon2 hash; a successful login yields an HS256-signed token that the
//! [`AdminSession`] extractor checks on every mutating request.
//!
//! When no admin credentials are configured, [`ApiState::sessions`] is
//! `None` and the extractor lets every request through without claims.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use eyre::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::session::LoginResponse,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm
///
/// Returns the PHC string (algorithm, parameters, salt and hash), suitable
/// for `ADMIN_PASSWORD_HASH`.
///
/// # Example
///
/// ```rust
/// use slotbook_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("hunter2").unwrap();
/// assert!(verify_password(&hashed, "hunter2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a PHC hash. A malformed hash never verifies.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored admin password hash is invalid: {}", e);
            false
        }
    }
}

/// The single admin account
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

/// Claims carried by an admin session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin username
    pub sub: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Token id
    pub jti: String,
}

impl SessionClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Issues and verifies admin session tokens
#[derive(Clone)]
pub struct SessionIssuer {
    credentials: AdminCredentials,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(credentials: AdminCredentials, secret: &[u8], ttl: Duration) -> Self {
        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Exchanges admin credentials for a signed token.
    ///
    /// # Errors
    ///
    /// * `SlotError::Authentication` - Unknown username or wrong password
    /// * `SlotError::Internal` - The token could not be signed
    pub fn login(&self, username: &str, password: &str) -> SlotResult<LoginResponse> {
        let password_ok = verify_password(&self.credentials.password_hash, password);
        if username != self.credentials.username || !password_ok {
            return Err(SlotError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let now = Utc::now();
        let claims = SessionClaims {
            sub: self.credentials.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SlotError::Internal(Box::new(e)))?;

        debug!(jti = %claims.jti, "Issued admin session");
        Ok(LoginResponse {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Validates signature, expiry and subject of `token`.
    pub fn verify(&self, token: &str) -> SlotResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| SlotError::Authentication(format!("Invalid session token: {e}")))?
            .claims;

        if claims.sub != self.credentials.username {
            return Err(SlotError::Authentication(
                "Session token was issued for another user".to_string(),
            ));
        }
        Ok(claims)
    }
}

/// Admin session of the current request.
///
/// Holds `None` when admin authentication is disabled. With authentication
/// enabled, extraction fails with 401 unless the request carries a valid
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Option<SessionClaims>);

impl AdminSession {
    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.sub.as_str())
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(sessions) = &state.sessions else {
            return Ok(AdminSession(None));
        };

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty());

        let Some(token) = token else {
            warn!(path = %parts.uri.path(), "Rejected request without session token");
            return Err(AppError(SlotError::Authentication(
                "Missing session token".to_string(),
            )));
        };

        let claims = sessions.verify(token).inspect_err(|e| {
            warn!(path = %parts.uri.path(), "Rejected session token: {}", e);
        })?;
        Ok(AdminSession(Some(claims)))
    }
}
