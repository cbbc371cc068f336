use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::InvalidTokenReason;
use super::errors::JwtError;

/// Claims carried on the wire inside a signed token.
///
/// Standard RFC 7519 names: `sub` is the user identifier, `iat` and `exp`
/// are Unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject that expire `ttl` after `now`.
    ///
    /// Returns `None` when the expiration falls outside the representable range.
    pub fn for_subject(
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// A token is expired from the exact second of `exp` onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// The identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<Claims> for IdentityClaim {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let timestamp = |secs: i64, name: &str| {
            DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
                JwtError::invalid(InvalidTokenReason::Malformed(format!(
                    "'{}' is out of range",
                    name
                )))
            })
        };

        if claims.sub.is_empty() {
            return Err(JwtError::invalid(InvalidTokenReason::Malformed(
                "empty 'sub' claim".to_string(),
            )));
        }

        Ok(Self {
            issued_at: timestamp(claims.iat, "iat")?,
            expires_at: timestamp(claims.exp, "exp")?,
            subject: claims.sub,
        })
    }
}
