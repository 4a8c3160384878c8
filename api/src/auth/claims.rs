use serde::{Deserialize, Serialize};
use services::AdminIdentity;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The verified admin behind this token, for passing into services.
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity::verified(self.0.sub)
    }
}
