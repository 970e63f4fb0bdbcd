//! Token claim decoding
//!
//! The backend issues signed bearer tokens; the client never checks the
//! signature locally (trust is established by the remote verify call) but
//! decodes the claims against a strict schema so a malformed token can never
//! produce a partially populated identity.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use strata_core::{StrataError, StrataResult};
use tracing::debug;

use crate::types::Identity;

/// Claims carried by a Strata access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email address
    pub sub: String,
    pub user_id: String,
    pub community_id: String,
    pub is_admin: bool,
    /// Expiration time, seconds since epoch
    pub exp: i64,
}

impl Claims {
    /// Decode claims from a token without verifying the signature.
    ///
    /// Expiry is NOT checked here; the session flow decides what an expired
    /// token means (delete and fall back to unauthenticated).
    pub fn decode(token: &str) -> StrataResult<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| {
                debug!("Token claim decoding failed: {}", e);
                StrataError::authentication(
                    format!("Invalid or expired token: {}", e),
                    "claims",
                )
            })?;

        Ok(data.claims)
    }

    /// Check the expiry claim against current time
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Derive the session identity from these claims
    pub fn to_identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            email: self.sub.clone(),
            community_id: self.community_id.clone(),
            is_admin: self.is_admin,
            expires_at: self.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn encode_claims(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn sample_claims(exp: i64) -> Claims {
        Claims {
            sub: "resident@example.com".to_string(),
            user_id: "17".to_string(),
            community_id: "HOA-42".to_string(),
            is_admin: true,
            exp,
        }
    }

    #[test]
    fn decodes_claims_without_signature_check() {
        let token = encode_claims(&sample_claims(4_000_000_000));
        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.sub, "resident@example.com");
        assert_eq!(claims.user_id, "17");
        assert_eq!(claims.community_id, "HOA-42");
        assert!(claims.is_admin);
    }

    #[test]
    fn identity_mirrors_claims() {
        let claims = sample_claims(4_000_000_000);
        let identity = claims.to_identity();
        assert_eq!(identity.email, claims.sub);
        assert_eq!(identity.user_id, claims.user_id);
        assert_eq!(identity.community_id, claims.community_id);
        assert_eq!(identity.is_admin, claims.is_admin);
        assert_eq!(identity.expires_at, claims.exp);
    }

    #[test]
    fn expired_token_is_detected() {
        assert!(sample_claims(1_000_000_000).is_expired());
        assert!(!sample_claims(4_000_000_000).is_expired());
    }

    #[test]
    fn garbage_token_fails_to_decode() {
        assert!(Claims::decode("not-a-token").is_err());
    }

    #[test]
    fn missing_required_claim_fails_to_decode() {
        // No community_id claim: the strict schema must refuse it rather
        // than hand back a partial identity
        let payload = serde_json::json!({
            "sub": "resident@example.com",
            "user_id": "17",
            "is_admin": false,
            "exp": 4_000_000_000_i64,
        });
        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(Claims::decode(&token).is_err());
    }

    #[test]
    fn extra_claims_are_tolerated() {
        // Backend tokens carry claims the client does not use
        let payload = serde_json::json!({
            "sub": "resident@example.com",
            "user_id": "17",
            "community_id": "HOA-42",
            "community_name": "Elm Grove",
            "is_admin": false,
            "exp": 4_000_000_000_i64,
        });
        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.community_id, "HOA-42");
    }
}
