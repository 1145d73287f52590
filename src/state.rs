/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - api: 上流 API client, auth_defaults: cookie が無い時の token, cookies: cookie 名と属性
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエストを跨ぐ可変状態は持たない
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::upstream::{ApiClient, ApiResult, AuthDefaults, Endpoints};

/// 認証 cookie の名前と属性
#[derive(Clone, Debug)]
pub struct AuthCookies {
    pub token_name: String,
    pub token_type_name: String,
    pub secure: bool,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub api: ApiClient,
    pub auth_defaults: Arc<AuthDefaults>,
    pub cookies: Arc<AuthCookies>,
}

impl AppState {
    pub fn new(api: ApiClient, auth_defaults: AuthDefaults, cookies: AuthCookies) -> Self {
        Self {
            api,
            auth_defaults: Arc::new(auth_defaults),
            cookies: Arc::new(cookies),
        }
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let api = ApiClient::new(Endpoints::from_config(config))?;

        let auth_defaults = AuthDefaults {
            token: config.fallback_token.clone(),
            token_type: config.fallback_token_type.clone(),
        };

        let cookies = AuthCookies {
            token_name: config.token_cookie.clone(),
            token_type_name: config.token_type_cookie.clone(),
            secure: config.app_env.is_production(),
        };

        Ok(Self::new(api, auth_defaults, cookies))
    }
}
