/*
 * Responsibility
 * - 上流 API に送る認証情報 (AuthContext) の型
 * - cookie の値 / 設定の fallback から AuthContext を解決する
 * - Authorization ヘッダ値の組み立て (type の二重付与をしない)
 *
 * Notes
 * - cookie を読むのは pages 側の extractor の責務。ここは値を受け取るだけ
 */

pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// 設定から来る server 側の既定値 (cookie が無い時に使う)
#[derive(Debug, Clone, Default)]
pub struct AuthDefaults {
    pub token: Option<String>,
    pub token_type: Option<String>,
}

/// 1 リクエスト分の認証コンテキスト
///
/// - `token` が無ければ上流には認証なしで送る
/// - `token_type` は常に空でない値 (既定は `Bearer`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
    token_type: String,
}

impl AuthContext {
    pub fn new(token: Option<String>, token_type: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        let token_type = token_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string());

        Self { token, token_type }
    }

    pub fn anonymous() -> Self {
        Self::new(None, None)
    }

    /// cookie の値を優先し、無ければ defaults を使う (token と type は別々に解決する)
    pub fn resolve(
        cookie_token: Option<&str>,
        cookie_token_type: Option<&str>,
        defaults: &AuthDefaults,
    ) -> Self {
        let token = non_blank(cookie_token).or_else(|| defaults.token.clone());
        let token_type = non_blank(cookie_token_type).or_else(|| defaults.token_type.clone());

        Self::new(token, token_type)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` ヘッダの値。token が無ければ None。
    /// token 自体が既に `<type> ` で始まっていれば付け直さない。
    pub fn authorization_value(&self) -> Option<String> {
        let token = self.token()?;
        let prefix = format!("{} ", self.token_type());
        if token.starts_with(&prefix) {
            Some(token.to_string())
        } else {
            Some(format!("{prefix}{token}"))
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
