//! Authentication utilities library
//!
//! Provides the credential primitives behind the identity service:
//! - Password hashing (Argon2id, tunable cost)
//! - RS256 token issuing and verification with a load-once key pair
//! - Authentication coordination
//!
//! Nothing here knows about users or storage; services adapt these pieces to
//! their own domain types.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```no_run
//! use auth::{Authenticator, KeyPair, PasswordHasher};
//! use chrono::{Duration, Utc};
//!
//! let keys = KeyPair::load("keys/private-key.pem", "keys/public-key.pem").unwrap();
//! let auth = Authenticator::new(PasswordHasher::new(), &keys, Duration::days(7));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 42, Utc::now()).unwrap();
//!
//! // Later: validate the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! let claim = auth.validate_token(&header, Utc::now()).unwrap();
//! assert_eq!(claim.subject, "42");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::IdentityClaim;
pub use jwt::InvalidTokenReason;
pub use jwt::JwtError;
pub use jwt::KeyError;
pub use jwt::KeyPair;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
