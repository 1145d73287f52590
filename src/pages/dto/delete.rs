/*
 * Responsibility
 * - 削除確認フォーム (confirm=yes が無い POST では削除しない)
 */
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
    // 失敗時に確認画面を描き直すための表示名
    pub label: Option<String>,
}

impl DeleteForm {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("yes")
    }
}
