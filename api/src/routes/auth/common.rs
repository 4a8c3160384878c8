use db::models::admin::Model as AdminModel;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: i64,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AdminModel> for AdminResponse {
    fn from(admin: AdminModel) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            created_at: admin.created_at.to_rfc3339(),
            updated_at: admin.updated_at.to_rfc3339(),
        }
    }
}

/// Admin details plus a freshly issued token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub id: i64,
    pub email: String,
    pub token: String,
    pub expires_at: String,
}
