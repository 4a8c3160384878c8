use crate::auth::claims::{AuthUser, Claims};
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use util::config::AppConfig;

/// Verifies an HS256 token against `JWT_SECRET`, rejecting expired ones.
pub fn decode_token(token: &str) -> Option<Claims> {
    let secret = AppConfig::global().jwt_secret.clone();
    if secret.is_empty() {
        return None;
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .ok()
    .map(|data| data.claims)
}

/// Reads `Authorization: Bearer <jwt>` into an [`AuthUser`].
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

        decode_token(bearer.token())
            .map(AuthUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}
