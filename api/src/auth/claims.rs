use db::models::user::Role;
use db::scope::AccessScope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Administrator
    }

    /// Visibility scope of the authenticated caller.
    pub fn scope(&self) -> AccessScope {
        AccessScope::new(self.0.role, self.0.sub)
    }
}
