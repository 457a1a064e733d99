// src/auth.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Payload the Jobly API signs into its tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }
}

/// Read the claims out of a bearer token. The signature is not checked:
/// tokens are issued and verified by the API, this side only needs the
/// username.
pub fn decode_token(token: &str) -> Result<Claims> {
    let header = decode_header(token).context("Malformed auth token")?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .context("Auth token payload is not a Jobly token")?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AUTH_TOKEN;

    #[test]
    fn test_decode_known_token() {
        let claims = decode_token(AUTH_TOKEN).unwrap();
        assert_eq!(claims.username, "testuser");
        assert!(!claims.is_admin);
        assert_eq!(claims.iat, Some(1598159259));
        assert_eq!(
            claims.issued_at().unwrap().format("%Y-%m-%d").to_string(),
            "2020-08-23"
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_token("not-a-token").is_err());
        assert!(decode_token("").is_err());
    }
}
