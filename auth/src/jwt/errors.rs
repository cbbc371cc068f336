use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token lifetime must be at least one second, got {0} seconds")]
    InvalidLifetime(i64),

    /// Any verification failure. The message is deliberately the same for
    /// every cause; `reason` is for server-side logs only.
    #[error("Invalid token")]
    InvalidToken { reason: InvalidTokenReason },
}

impl JwtError {
    pub(crate) fn invalid(reason: InvalidTokenReason) -> Self {
        JwtError::InvalidToken { reason }
    }

    /// Internal cause of a verification failure, if this is one.
    pub fn invalid_reason(&self) -> Option<&InvalidTokenReason> {
        match self {
            JwtError::InvalidToken { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTokenReason {
    Empty,
    Malformed(String),
    UnexpectedAlgorithm(String),
    BadSignature,
    Expired,
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTokenReason::Empty => write!(f, "empty token"),
            InvalidTokenReason::Malformed(detail) => write!(f, "malformed token: {}", detail),
            InvalidTokenReason::UnexpectedAlgorithm(alg) => {
                write!(f, "unexpected signing algorithm: {}", alg)
            }
            InvalidTokenReason::BadSignature => write!(f, "signature verification failed"),
            InvalidTokenReason::Expired => write!(f, "token expired"),
        }
    }
}

/// Error type for loading signing keys.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Key file {path} is not a PEM-encoded RSA {expected} key: {reason}")]
    InvalidKey {
        path: PathBuf,
        expected: &'static str,
        reason: String,
    },

    #[error("Private and public keys do not form a pair: {0}")]
    Mismatch(String),
}
