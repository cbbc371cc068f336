use std::fs;
use std::path::Path;

use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::KeyError;

/// Load a PEM-encoded RSA private key (PKCS#8, PKCS#1 also accepted).
///
/// # Errors
/// * `Unreadable` - File is missing or cannot be read
/// * `InvalidKey` - Content is not PEM or not an RSA private key
pub fn load_private_key(path: impl AsRef<Path>) -> Result<EncodingKey, KeyError> {
    let path = path.as_ref();
    let pem = read_pem(path)?;

    EncodingKey::from_rsa_pem(&pem).map_err(|e| KeyError::InvalidKey {
        path: path.to_path_buf(),
        expected: "private",
        reason: e.to_string(),
    })
}

/// Load a PEM-encoded RSA public key (SubjectPublicKeyInfo, PKCS#1 also accepted).
///
/// # Errors
/// * `Unreadable` - File is missing or cannot be read
/// * `InvalidKey` - Content is not PEM or not an RSA public key
pub fn load_public_key(path: impl AsRef<Path>) -> Result<DecodingKey, KeyError> {
    let path = path.as_ref();
    let pem = read_pem(path)?;

    DecodingKey::from_rsa_pem(&pem).map_err(|e| KeyError::InvalidKey {
        path: path.to_path_buf(),
        expected: "public",
        reason: e.to_string(),
    })
}

fn read_pem(path: &Path) -> Result<Vec<u8>, KeyError> {
    fs::read(path).map_err(|source| KeyError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Process-wide RSA signing key pair.
///
/// Built once at startup and never mutated afterwards. The private half is
/// only handed to the token issuer and the public half to the verifier.
#[derive(Clone)]
pub struct KeyPair {
    private_key: EncodingKey,
    public_key: DecodingKey,
}

impl KeyPair {
    /// Load both keys from disk and check that they belong together.
    ///
    /// # Errors
    /// * `Unreadable` / `InvalidKey` - Either key failed to load
    /// * `Mismatch` - A probe token signed with the private key does not
    ///   verify with the public key
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let private_key_path = private_key_path.as_ref();
        let public_key_path = public_key_path.as_ref();

        let key_pair = Self::from_keys(
            load_private_key(private_key_path)?,
            load_public_key(public_key_path)?,
        )?;

        tracing::info!(
            private_key = %private_key_path.display(),
            public_key = %public_key_path.display(),
            algorithm = "RS256",
            "Token signing keys loaded"
        );

        Ok(key_pair)
    }

    /// Build a key pair from already parsed keys, running the same probe as `load`.
    pub fn from_keys(private_key: EncodingKey, public_key: DecodingKey) -> Result<Self, KeyError> {
        let key_pair = Self {
            private_key,
            public_key,
        };
        key_pair.probe()?;
        Ok(key_pair)
    }

    pub(crate) fn private_key(&self) -> &EncodingKey {
        &self.private_key
    }

    pub(crate) fn public_key(&self) -> &DecodingKey {
        &self.public_key
    }

    fn probe(&self) -> Result<(), KeyError> {
        let claims = Claims {
            sub: "key-probe".to_string(),
            iat: 0,
            exp: i64::MAX,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.private_key)
            .map_err(|e| KeyError::Mismatch(format!("probe signing failed: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<Claims>(&token, &self.public_key, &validation)
            .map(|_| ())
            .map_err(|e| KeyError::Mismatch(e.to_string()))
    }
}
