/*
 * Responsibility
 * - 環境変数や設定の読み込み (上流 API の URL、パス、fallback token、cookie 名など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - 環境変数から切り離した from_lookup() を持たせてテスト可能にする
 */
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::services::upstream::url::{build_url, normalize_login_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub api_base_url: String,
    pub users_path: String,
    pub prompt_configs_path: String,
    pub login_path: String,
    pub login_url_override: Option<String>,

    // cookie が無い時 (初回アクセスや curl 等) に使う server 側の token
    pub fallback_token: Option<String>,
    pub fallback_token_type: Option<String>,

    pub token_cookie: String,
    pub token_type_cookie: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空文字は未設定扱い
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let api_base_url = get("API_BASE_URL")
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_string())
            .trim()
            .to_string();
        url::Url::parse(&api_base_url).map_err(|_| ConfigError::Invalid("API_BASE_URL"))?;

        let users_path = get("API_USERS_PATH").unwrap_or_else(|| "/users".to_string());
        let prompt_configs_path =
            get("API_PROMPT_CONFIGS_PATH").unwrap_or_else(|| "/prompt-configs".to_string());
        let login_path = get("API_LOGIN_PATH").unwrap_or_else(|| "/auth/login".to_string());
        let login_url_override = get("API_LOGIN_URL");

        let fallback_token = get("API_TOKEN");
        let fallback_token_type = get("API_TOKEN_TYPE");

        let token_cookie = get("AUTH_TOKEN_COOKIE").unwrap_or_else(|| "token".to_string());
        let token_type_cookie =
            get("AUTH_TOKEN_TYPE_COOKIE").unwrap_or_else(|| "token_type".to_string());
        if token_cookie == token_type_cookie {
            return Err(ConfigError::Invalid("AUTH_TOKEN_TYPE_COOKIE"));
        }

        Ok(Self {
            addr,
            app_env,
            api_base_url,
            users_path,
            prompt_configs_path,
            login_path,
            login_url_override,
            fallback_token,
            fallback_token_type,
            token_cookie,
            token_type_cookie,
        })
    }

    pub fn users_url(&self) -> String {
        build_url(&self.api_base_url, &self.users_path)
    }

    pub fn prompt_configs_url(&self) -> String {
        build_url(&self.api_base_url, &self.prompt_configs_path)
    }

    pub fn login_url(&self) -> String {
        match &self.login_url_override {
            Some(explicit) => normalize_login_url(explicit),
            None => build_url(&self.api_base_url, &self.login_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_local_api() {
        let config = config_with(&[]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.users_url(), "http://127.0.0.1:8000/users");
        assert_eq!(config.prompt_configs_url(), "http://127.0.0.1:8000/prompt-configs");
        assert_eq!(config.login_url(), "http://127.0.0.1:8000/auth/login");
        assert_eq!(config.token_cookie, "token");
        assert_eq!(config.token_type_cookie, "token_type");
        assert!(config.fallback_token.is_none());
    }

    #[test]
    fn path_overrides_are_joined_with_one_slash() {
        let config = config_with(&[
            ("API_BASE_URL", "https://api.example.com/v2/"),
            ("API_USERS_PATH", "accounts"),
            ("API_PROMPT_CONFIGS_PATH", "/prompts/"),
        ])
        .unwrap();

        assert_eq!(config.users_url(), "https://api.example.com/v2/accounts");
        assert_eq!(config.prompt_configs_url(), "https://api.example.com/v2/prompts/");
    }

    #[test]
    fn explicit_login_url_wins_and_is_normalized() {
        let config = config_with(&[
            ("API_LOGIN_PATH", "/ignored"),
            ("API_LOGIN_URL", "https://auth.example.com//auth//login"),
        ])
        .unwrap();

        assert_eq!(config.login_url(), "https://auth.example.com/auth/login");
    }

    #[test]
    fn production_env_is_recognised() {
        assert_eq!(
            config_with(&[("APP_ENV", "PROD")]).unwrap().app_env,
            AppEnv::Production
        );
        assert!(config_with(&[("APP_ENV", "production")]).unwrap().app_env.is_production());
        assert!(!config_with(&[("APP_ENV", "staging")]).unwrap().app_env.is_production());
    }

    #[test]
    fn invalid_values_fail_startup() {
        assert_eq!(
            config_with(&[("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            config_with(&[("API_BASE_URL", "not a url")]).unwrap_err(),
            ConfigError::Invalid("API_BASE_URL")
        );
        assert_eq!(
            config_with(&[("AUTH_TOKEN_COOKIE", "t"), ("AUTH_TOKEN_TYPE_COOKIE", "t")]).unwrap_err(),
            ConfigError::Invalid("AUTH_TOKEN_TYPE_COOKIE")
        );
    }

    #[test]
    fn blank_fallback_token_is_ignored() {
        let config = config_with(&[("API_TOKEN", "  "), ("API_TOKEN_TYPE", "Token")]).unwrap();

        assert!(config.fallback_token.is_none());
        assert_eq!(config.fallback_token_type.as_deref(), Some("Token"));
    }
}
