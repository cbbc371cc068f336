use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::IdentityClaim;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::KeyPair;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Holds the hasher, the token issuer and verifier built from one `KeyPair`,
/// and the lifetime given to every issued token.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// When the access token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for AuthenticationResult {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher configured with the desired cost
    /// * `key_pair` - RSA keys loaded at startup
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(password_hasher: PasswordHasher, key_pair: &KeyPair, token_ttl: Duration) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(key_pair),
            token_verifier: TokenVerifier::new(key_pair),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier placed in the token's `sub` claim
    /// * `now` - Issuance time
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.generate_token(subject, now)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, JwtError> {
        self.token_issuer
            .issue(subject, now, self.token_ttl)
            .map(AuthenticationResult::from)
    }

    /// Validate a token taken from an `Authorization` header.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged, uses another algorithm, or expired
    pub fn validate_token(
        &self,
        header_value: &str,
        now: DateTime<Utc>,
    ) -> Result<IdentityClaim, JwtError> {
        self.token_verifier.verify(header_value, now)
    }
}
