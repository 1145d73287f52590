/*
 * Responsibility
 * - Users のフォーム DTO
 * - validate() で必須チェック、repo に渡す UserPayload への変換
 */
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::{User, UserPayload};

/// フォームの入力値 (再描画時もそのまま template に渡す)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required.");
        }
        if self.email.trim().is_empty() {
            return Err("Email is required.");
        }
        Ok(())
    }

    /// create は `id: None`、update は対象の id を入れる
    pub fn to_payload(&self, id: Option<i64>) -> UserPayload {
        UserPayload {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.trim().to_string(),
        }
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}
