use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::services::error::WorkflowError;

const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Attendee id of the logged-in user.
    pub sub: i64,
    pub email: String,
    pub exp: i64,
}

/// Signing and verification keys for the `access_token` cookie. Tokens are
/// verified, never just decoded, so a client cannot forge its identity.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &str) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, attendee_id: i64, email: &str) -> Result<String, WorkflowError> {
        let claims = SessionClaims {
            sub: attendee_id,
            email: email.to_string(),
            exp: (Utc::now() + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| WorkflowError::Internal(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips() {
        let keys = SessionKeys::from_secret("secreto");
        let token = keys.issue(7, "ana@example.org").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "ana@example.org");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = SessionKeys::from_secret("secreto");
        let mut token = keys.issue(7, "ana@example.org").unwrap();
        token.push('x');
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn token_from_another_key_is_rejected() {
        let keys = SessionKeys::from_secret("secreto");
        let other = SessionKeys::from_secret("otro");
        let token = other.issue(7, "ana@example.org").unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::from_secret("secreto");
        let claims = SessionClaims {
            sub: 7,
            email: "ana@example.org".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secreto"),
        )
        .unwrap();
        assert!(keys.verify(&token).is_none());
    }
}
