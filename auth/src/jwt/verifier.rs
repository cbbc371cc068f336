use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::IdentityClaim;
use super::errors::InvalidTokenReason;
use super::errors::JwtError;
use super::issuer::SIGNING_ALGORITHM;
use super::keys::KeyPair;

const BEARER_SCHEME: &str = "Bearer";

/// Verifies identity tokens with the RSA public key.
pub struct TokenVerifier {
    public_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(key_pair: &KeyPair) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            public_key: key_pair.public_key().clone(),
            validation,
        }
    }

    /// Verify a token taken from an `Authorization` header value.
    ///
    /// Accepts the raw token or `Bearer <token>`, with surrounding whitespace.
    /// Checks run in order: header algorithm, signature, expiry against `now`.
    ///
    /// # Errors
    /// * `InvalidToken` - For every failure. The attached reason tells them apart
    ///   in logs but never changes the error message.
    pub fn verify(&self, header_value: &str, now: DateTime<Utc>) -> Result<IdentityClaim, JwtError> {
        let token = strip_bearer(header_value);
        if token.is_empty() {
            return Err(JwtError::invalid(InvalidTokenReason::Empty));
        }

        let header = decode_header(token)
            .map_err(|e| JwtError::invalid(InvalidTokenReason::Malformed(e.to_string())))?;
        if header.alg != SIGNING_ALGORITHM {
            return Err(JwtError::invalid(InvalidTokenReason::UnexpectedAlgorithm(
                format!("{:?}", header.alg),
            )));
        }

        let claims = decode::<Claims>(token, &self.public_key, &self.validation)
            .map_err(|e| {
                JwtError::invalid(match e.kind() {
                    ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
                    ErrorKind::InvalidAlgorithm => {
                        InvalidTokenReason::UnexpectedAlgorithm(format!("{:?}", header.alg))
                    }
                    _ => InvalidTokenReason::Malformed(e.to_string()),
                })
            })?
            .claims;

        if claims.is_expired(now) {
            return Err(JwtError::invalid(InvalidTokenReason::Expired));
        }

        IdentityClaim::try_from(claims)
    }
}

/// Remove an optional `Bearer` scheme and surrounding whitespace.
///
/// The scheme only counts when followed by whitespace or the end of input, so
/// `"Bearer "` yields an empty token and `"Bearerabc"` is left intact.
pub fn strip_bearer(header_value: &str) -> &str {
    let value = header_value.trim_start();

    match value.strip_prefix(BEARER_SCHEME) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value.trim(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Duration;
    use jsonwebtoken::encode;
    use jsonwebtoken::Algorithm;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;

    use super::*;
    use crate::jwt::issuer::TokenIssuer;
    use crate::jwt::keys::tests::test_key_pair;
    use crate::jwt::keys::tests::testdata;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn reason(result: Result<IdentityClaim, JwtError>) -> InvalidTokenReason {
        let err = result.expect_err("Token should have been rejected");
        assert_eq!(err.to_string(), "Invalid token");
        err.invalid_reason()
            .cloned()
            .expect("Expected an InvalidToken error")
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = test_key_pair();
        let issuer = TokenIssuer::new(&keys);
        let verifier = TokenVerifier::new(&keys);
        let now = Utc::now();

        let issued = issuer.issue(42, now, Duration::days(7)).unwrap();
        let claim = verifier
            .verify(&format!("Bearer {}", issued.token), now)
            .expect("Failed to verify token");

        assert_eq!(claim.subject, "42");
        assert_eq!(claim.expires_at, issued.expires_at);
    }

    #[test]
    fn test_bearer_prefix_is_optional() {
        let keys = test_key_pair();
        let issued = TokenIssuer::new(&keys)
            .issue("7", at(1000), Duration::hours(1))
            .unwrap();
        let verifier = TokenVerifier::new(&keys);

        assert!(verifier.verify(&issued.token, at(1001)).is_ok());
        assert!(verifier
            .verify(&format!("  Bearer   {}  ", issued.token), at(1001))
            .is_ok());
    }

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer abc"), "abc");
        assert_eq!(strip_bearer("  abc \n"), "abc");
        assert_eq!(strip_bearer("Bearer "), "");
        assert_eq!(strip_bearer("Bearer\t"), "");
        assert_eq!(strip_bearer("  Bearer"), "");
        assert_eq!(strip_bearer("Bearer\tabc "), "abc");
        assert_eq!(strip_bearer("Bearerabc"), "Bearerabc");
        assert_eq!(strip_bearer(""), "");
    }

    #[test]
    fn test_expired_token() {
        let keys = test_key_pair();
        let issued = TokenIssuer::new(&keys)
            .issue("7", at(1000), Duration::hours(1))
            .unwrap();
        let verifier = TokenVerifier::new(&keys);

        assert!(verifier.verify(&issued.token, at(1000 + 3599)).is_ok());
        assert_eq!(
            reason(verifier.verify(&issued.token, at(1000 + 3600))),
            InvalidTokenReason::Expired
        );
        assert_eq!(
            reason(verifier.verify(&issued.token, at(1000 + 7200))),
            InvalidTokenReason::Expired
        );
    }

    #[test]
    fn test_altered_signature() {
        let keys = test_key_pair();
        let now = Utc::now();
        let issued = TokenIssuer::new(&keys)
            .issue("7", now, Duration::hours(1))
            .unwrap();

        let signature_start = issued.token.rfind('.').unwrap() + 1;
        let mut bytes = issued.token.into_bytes();
        let target = signature_start + 10;
        bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = TokenVerifier::new(&keys).verify(&tampered, now);
        assert_eq!(reason(result), InvalidTokenReason::BadSignature);
    }

    #[test]
    fn test_altered_claims() {
        let keys = test_key_pair();
        let now = Utc::now();
        let token = TokenIssuer::new(&keys)
            .issue("7", now, Duration::hours(1))
            .unwrap()
            .token;

        // Re-sign nothing, just swap in a payload claiming another subject
        let forged_payload = {
            let other = TokenIssuer::new(&keys)
                .issue("8", now, Duration::hours(1))
                .unwrap()
                .token;
            other.split('.').nth(1).unwrap().to_string()
        };
        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        let result = TokenVerifier::new(&keys).verify(&forged, now);
        assert_eq!(reason(result), InvalidTokenReason::BadSignature);
    }

    #[test]
    fn test_signed_by_other_key() {
        let other_keys = KeyPair::load(
            testdata("other-private-key.pem"),
            testdata("other-public-key.pem"),
        )
        .unwrap();
        let now = Utc::now();
        let issued = TokenIssuer::new(&other_keys)
            .issue("7", now, Duration::hours(1))
            .unwrap();

        let result = TokenVerifier::new(&test_key_pair()).verify(&issued.token, now);
        assert_eq!(reason(result), InvalidTokenReason::BadSignature);
    }

    #[test]
    fn test_symmetric_algorithm_with_public_key_as_secret() {
        let public_pem = fs::read(testdata("public-key.pem")).unwrap();
        let now = Utc::now();
        let claims = Claims::for_subject("7", now, Duration::hours(1)).unwrap();

        // Classic algorithm confusion: HMAC keyed with the published RSA public key
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&public_pem),
        )
        .unwrap();

        let result = TokenVerifier::new(&test_key_pair()).verify(&forged, now);
        assert_eq!(
            reason(result),
            InvalidTokenReason::UnexpectedAlgorithm("HS256".to_string())
        );
    }

    #[test]
    fn test_other_rsa_algorithm_rejected() {
        let keys = test_key_pair();
        let now = Utc::now();
        let claims = Claims::for_subject("7", now, Duration::hours(1)).unwrap();
        let private_pem = fs::read(testdata("private-key.pem")).unwrap();

        let token = encode(
            &Header::new(Algorithm::RS512),
            &claims,
            &EncodingKey::from_rsa_pem(&private_pem).unwrap(),
        )
        .unwrap();

        let result = TokenVerifier::new(&keys).verify(&token, now);
        assert_eq!(
            reason(result),
            InvalidTokenReason::UnexpectedAlgorithm("RS512".to_string())
        );
    }

    #[test]
    fn test_none_algorithm_rejected() {
        // {"alg":"none","typ":"JWT"} . {"sub":"7","iat":0,"exp":9999999999} . (no signature)
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJzdWIiOiI3IiwiaWF0IjowLCJleHAiOjk5OTk5OTk5OTl9.";

        let result = TokenVerifier::new(&test_key_pair()).verify(token, Utc::now());
        assert!(matches!(reason(result), InvalidTokenReason::Malformed(_)));
    }

    #[test]
    fn test_garbage_token() {
        let verifier = TokenVerifier::new(&test_key_pair());

        assert!(matches!(
            reason(verifier.verify("invalid.token.here", Utc::now())),
            InvalidTokenReason::Malformed(_)
        ));
        assert_eq!(
            reason(verifier.verify("Bearer ", Utc::now())),
            InvalidTokenReason::Empty
        );
        assert_eq!(
            reason(verifier.verify("Bearer\t", Utc::now())),
            InvalidTokenReason::Empty
        );
    }
}
