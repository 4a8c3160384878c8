pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config::AppConfig;

/// Generates a JWT and its RFC 3339 expiry timestamp for an admin.
pub fn generate_jwt(admin_id: i64, admin: bool) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let (secret, duration_minutes) = {
        let config = AppConfig::global();
        (config.jwt_secret.clone(), config.jwt_duration_minutes)
    };

    let expiry = Utc::now() + Duration::minutes(duration_minutes as i64);
    let claims = Claims {
        sub: admin_id,
        admin,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}
