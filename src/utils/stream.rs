use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// User-token claims understood by the managed video service. The service
/// validates the signature against the shared API secret; no `exp` is set, so
/// the token stays valid until the key rotates.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamTokenClaims {
    pub user_id: String,
    pub iat: usize,
}

pub fn mint_user_token(
    user_id: &str,
    api_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = StreamTokenClaims {
        user_id: user_id.to_string(),
        iat: Utc::now().timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(api_secret.as_bytes()),
    )
}
