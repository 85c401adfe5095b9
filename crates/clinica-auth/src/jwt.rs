use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::session::UserMetadata;

/// Audience of access tokens issued to signed-in users.
pub const AUDIENCE: &str = "authenticated";

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Validate an HS256 access token against the project's JWT secret.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUDIENCE]);
    validation.validate_exp = true;

    match decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(AuthError::TokenExpired),
        Err(e) => Err(AuthError::Jwt(e)),
    }
}

/// Read claims without checking the signature.
///
/// Only for display (who is signed in); never for authorisation.
pub fn read_claims(token: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;

    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Sign `claims` with HS256.
pub fn issue_token(claims: &SessionClaims, secret: &[u8]) -> Result<String, AuthError> {
    Ok(encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )?)
}
