/*
 * Responsibility
 * - Prompt configs のフォーム DTO と一覧の行 (view model)
 * - checkbox は未チェックだとフィールド自体が来ないので Option で受ける
 */
use serde::{Deserialize, Serialize};

use crate::repos::prompt_config_repo::{PromptConfig, PromptConfigPayload};
use crate::services::upstream::url::encode_segment;

const SUMMARY_MAX_CHARS: usize = 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptConfigForm {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub user_prompt: String,
    pub is_active: Option<String>,
}

impl PromptConfigForm {
    pub fn is_active(&self) -> bool {
        self.is_active.is_some()
    }

    /// 作成時だけ key を見る (edit では key は URL 側で固定)
    pub fn validate_new(&self) -> Result<(), &'static str> {
        if self.key.trim().is_empty() {
            return Err("Key is required.");
        }
        Ok(())
    }

    pub fn to_payload(&self, key: &str) -> PromptConfigPayload {
        PromptConfigPayload {
            key: key.trim().to_string(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: self.user_prompt.clone(),
            is_active: self.is_active(),
        }
    }

    pub fn view(&self, key: &str) -> PromptConfigView {
        PromptConfigView {
            key: key.to_string(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: self.user_prompt.clone(),
            is_active: self.is_active(),
        }
    }
}

/// フォーム描画用の値
#[derive(Debug, Clone, Serialize)]
pub struct PromptConfigView {
    pub key: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub is_active: bool,
}

impl PromptConfigView {
    /// 新規作成フォームの初期値 (active で始める)
    pub fn blank() -> Self {
        Self {
            key: String::new(),
            system_prompt: String::new(),
            user_prompt: String::new(),
            is_active: true,
        }
    }
}

impl From<&PromptConfig> for PromptConfigView {
    fn from(config: &PromptConfig) -> Self {
        Self {
            key: config.key.clone(),
            system_prompt: config.system_prompt.clone(),
            user_prompt: config.user_prompt.clone(),
            is_active: config.is_active,
        }
    }
}

/// 一覧の 1 行
#[derive(Debug, Clone, Serialize)]
pub struct PromptConfigRow {
    pub key: String,
    pub segment: String,
    pub is_active: bool,
    pub system_summary: String,
    pub user_summary: String,
}

impl From<&PromptConfig> for PromptConfigRow {
    fn from(config: &PromptConfig) -> Self {
        Self {
            key: config.key.clone(),
            segment: encode_segment(&config.key),
            is_active: config.is_active,
            system_summary: clip(&config.system_prompt, SUMMARY_MAX_CHARS),
            user_summary: clip(&config.user_prompt, SUMMARY_MAX_CHARS),
        }
    }
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: &str, system_prompt: &str) -> PromptConfig {
        PromptConfig {
            id: 1,
            key: key.into(),
            system_prompt: system_prompt.into(),
            user_prompt: "short".into(),
            is_active: false,
        }
    }

    #[test]
    fn rows_clip_long_prompts_and_encode_the_key() {
        let long = "x".repeat(61);
        let row = PromptConfigRow::from(&config("a/b c", &long));

        assert_eq!(row.segment, "a%2Fb%20c");
        assert_eq!(row.system_summary, format!("{}...", "x".repeat(60)));
        assert_eq!(row.user_summary, "short");
    }

    #[test]
    fn clip_counts_characters_not_bytes() {
        let text = "あ".repeat(60);
        assert_eq!(clip(&text, 60), text);
    }

    #[test]
    fn missing_checkbox_means_inactive() {
        let form = PromptConfigForm {
            key: " greeting ".into(),
            ..Default::default()
        };

        assert!(!form.is_active());
        assert_eq!(form.validate_new(), Ok(()));
        assert_eq!(form.to_payload(&form.key).key, "greeting");
    }

    #[test]
    fn blank_key_is_rejected_on_create() {
        let form = PromptConfigForm {
            key: "   ".into(),
            ..Default::default()
        };

        assert_eq!(form.validate_new(), Err("Key is required."));
    }
}
