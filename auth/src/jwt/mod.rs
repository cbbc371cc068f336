pub mod claims;
pub mod errors;
pub mod issuer;
pub mod keys;
pub mod verifier;

pub use claims::Claims;
pub use claims::IdentityClaim;
pub use errors::InvalidTokenReason;
pub use errors::JwtError;
pub use errors::KeyError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::SIGNING_ALGORITHM;
pub use keys::KeyPair;
pub use verifier::strip_bearer;
pub use verifier::TokenVerifier;
