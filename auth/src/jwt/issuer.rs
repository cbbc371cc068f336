use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::keys::KeyPair;

/// The only algorithm tokens are ever signed or accepted with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs identity tokens with the RSA private key.
pub struct TokenIssuer {
    private_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(key_pair: &KeyPair) -> Self {
        Self {
            private_key: key_pair.private_key().clone(),
        }
    }

    /// Sign a token for `subject` that expires `ttl` after `now`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is shorter than one second, so the token
    ///   would not expire strictly after `now`, or so long that the expiration
    ///   overflows
    /// * `SigningFailed` - The private key could not produce a signature
    pub fn issue(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<IssuedToken, JwtError> {
        if ttl < Duration::seconds(1) {
            return Err(JwtError::InvalidLifetime(ttl.num_seconds()));
        }

        let claims = Claims::for_subject(subject, now, ttl)
            .ok_or_else(|| JwtError::InvalidLifetime(ttl.num_seconds()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| JwtError::InvalidLifetime(ttl.num_seconds()))?;

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.private_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}
