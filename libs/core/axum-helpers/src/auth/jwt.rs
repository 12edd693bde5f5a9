use super::config::JwtConfig;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Claims carried by identity-provider tokens.
///
/// `sub` is the authenticated username and `roles` holds canonical role
/// names (e.g. `ROLE_LIBRARIAN`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Verifies HS256 tokens issued by the external identity provider.
///
/// Tokens are never minted here.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        tracing::info!(issuer = ?config.issuer, "JWT verifier initialized");
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry, then decode claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn sign(claims: &JwtClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp: i64) -> JwtClaims {
        JwtClaims {
            sub: "alice".to_string(),
            roles: vec!["ROLE_LIBRARIAN".to_string()],
            exp,
            iat: now(),
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = JwtVerifier::new(&JwtConfig::new(SECRET));
        let token = sign(&claims(now() + 600), SECRET);

        let decoded = verifier.verify_token(&token).unwrap();
        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.roles, vec!["ROLE_LIBRARIAN".to_string()]);
    }

    #[test]
    fn test_reject_wrong_secret() {
        let verifier = JwtVerifier::new(&JwtConfig::new(SECRET));
        let token = sign(&claims(now() + 600), "another-secret-that-is-32-chars-long!");

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_reject_expired_token() {
        let verifier = JwtVerifier::new(&JwtConfig::new(SECRET));
        let token = sign(&claims(now() - 3600), SECRET);

        assert!(verifier.verify_token(&token).is_err());
    }
}
