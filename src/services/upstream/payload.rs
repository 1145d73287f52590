/*
 * Responsibility
 * - 上流レスポンス body の形の揺れを吸収する
 *   - list: 素の配列 or `{ <field>: [...] }`
 *   - login: token のキー名 (access_token/token/jwt/auth_token) と token_type
 */
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::upstream::auth::DEFAULT_TOKEN_TYPE;
use crate::services::upstream::error::ApiResult;

/// login レスポンスで token として探すキー (先勝ち)
pub const TOKEN_KEYS: [&str; 4] = ["access_token", "token", "jwt", "auth_token"];

/// 配列そのもの、または `wrapper_field` の下の配列を `Vec<T>` にする。
/// どちらでもなければ decode エラー。
pub fn normalize_list<T>(payload: Value, wrapper_field: &str) -> ApiResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let items = match payload {
        Value::Object(mut map) => map.remove(wrapper_field).unwrap_or(Value::Object(map)),
        other => other,
    };

    Ok(serde_json::from_value(items)?)
}

/// body を JSON として読む。壊れていれば空 object 扱い。
pub fn parse_lenient(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Default::default()))
}

pub fn token_from_payload(payload: &Value) -> Option<String> {
    let map = payload.as_object()?;
    TOKEN_KEYS
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn token_type_from_payload(payload: &Value) -> String {
    payload
        .get("token_type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOKEN_TYPE)
        .to_string()
}
