use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

use crate::error::AuthFailure;
use crate::services::auth::credential::Credential;
use crate::services::auth::principal::VerifiedIdentity;

/// Checks a raw credential and yields the identity it carries.
///
/// Implementations must be safe to call from many requests at once.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &Credential) -> Result<VerifiedIdentity, AuthFailure>;
}

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingOrInvalidAud,
    EmptyClaim(&'static str),
}

impl AccessJwtError {
    fn is_expired(&self) -> bool {
        matches!(self, Self::Jwt(e) if matches!(e.kind(), ErrorKind::ExpiredSignature))
    }
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

impl From<AccessJwtError> for AuthFailure {
    fn from(e: AccessJwtError) -> Self {
        if e.is_expired() {
            AuthFailure::TokenExpired
        } else {
            AuthFailure::TokenInvalid
        }
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// Access token (JWT) claims.
///
/// `kind` distinguishes user tokens (absent or `"user"`) from service tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    // Keep as Value to accept both string and array. Validation handles audience checks.
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub kind: Option<String>,
}

/// EdDSA (Ed25519) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(
        access_public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_ed_pem(access_public_key_pem.as_bytes())
            .map_err(|e| format!("invalid ed25519 public key pem: {}", e))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks:
    /// - signature
    /// - `exp` (with leeway)
    /// - `iss` and `aud` (because we set them)
    ///
    /// This method additionally rejects empty `iss`/`aud`/`exp`.
    /// An empty `sub` is left to principal resolution.
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if claims.iss.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(AccessJwtError::MissingOrInvalidAud);
        }

        Ok(claims)
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, credential: &Credential) -> Result<VerifiedIdentity, AuthFailure> {
        let claims = self.verify_strict(credential.token()).map_err(|err| {
            tracing::debug!(error = %err, "access token rejected");
            AuthFailure::from(err)
        })?;

        Ok(VerifiedIdentity::new(claims.sub, claims.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    const PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/access_ed25519_private.pem");
    const PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/access_ed25519_public.pem");
    const FOREIGN_PEM: &str = include_str!("../../../tests/fixtures/foreign_ed25519_private.pem");

    fn verifier() -> JwtVerifier {
        JwtVerifier::new(PUBLIC_PEM, "https://issuer.test", "orders-api", 0).unwrap()
    }

    fn sign(claims: serde_json::Value, pem: &str) -> String {
        let key = EncodingKey::from_ed_pem(pem.as_bytes()).unwrap();
        jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), &claims, &key).unwrap()
    }

    fn claims(sub: &str, exp_offset: i64) -> serde_json::Value {
        json!({
            "iss": "https://issuer.test",
            "aud": "orders-api",
            "sub": sub,
            "exp": chrono::Utc::now().timestamp() + exp_offset,
        })
    }

    #[test]
    fn valid_token_yields_identity() {
        let token = sign(claims("42", 300), PRIVATE_PEM);
        let identity = verifier()
            .verify(&Credential::new(format!("Bearer {token}")))
            .unwrap();
        assert_eq!(identity, VerifiedIdentity::new("42", None));
    }

    #[test]
    fn kind_claim_is_carried_through() {
        let mut c = claims("billing", 300);
        c["kind"] = json!("service");
        let token = sign(c, PRIVATE_PEM);
        let identity = verifier().verify(&Credential::new(token)).unwrap();
        assert_eq!(identity.kind.as_deref(), Some("service"));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let token = sign(claims("42", -3600), PRIVATE_PEM);
        let err = verifier()
            .verify(&Credential::new(format!("Bearer {token}")))
            .unwrap_err();
        assert!(matches!(err, AuthFailure::TokenExpired));
    }

    #[test]
    fn garbage_is_invalid() {
        let err = verifier()
            .verify(&Credential::new("Bearer garbage"))
            .unwrap_err();
        assert!(matches!(err, AuthFailure::TokenInvalid));
    }

    #[test]
    fn wrong_signing_key_is_invalid() {
        let token = sign(claims("42", 300), FOREIGN_PEM);
        let err = verifier().verify(&Credential::new(token)).unwrap_err();
        assert!(matches!(err, AuthFailure::TokenInvalid));
    }

    #[test]
    fn wrong_audience_is_invalid() {
        let mut c = claims("42", 300);
        c["aud"] = json!("someone-else");
        let token = sign(c, PRIVATE_PEM);
        let err = verifier().verify(&Credential::new(token)).unwrap_err();
        assert!(matches!(err, AuthFailure::TokenInvalid));
    }

    #[test]
    fn debug_hides_key_material() {
        let printed = format!("{:?}", verifier());
        assert!(!printed.contains("decoding_key"));
    }
}
