/*
 * Responsibility
 * - 上流 API の prompt-configs リソースに対する CRUD
 * - key が ID (作成後は変更不可)。URL には segment としてエンコードして載せる
 * - 作成/更新はどちらも PUT /prompt-configs/{key} (fallback なし)
 */
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::services::upstream::{ApiClient, ApiResult, AuthContext, url::item_url};

const LIST_FIELD: &str = "prompt_configs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub id: i64,
    pub key: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptConfigPayload {
    pub key: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub is_active: bool,
}

fn config_url(api: &ApiClient, key: &str) -> String {
    item_url(&api.endpoints().prompt_configs_url, key)
}

pub async fn list(api: &ApiClient, auth: &AuthContext) -> ApiResult<Vec<PromptConfig>> {
    api.get_list(auth, &api.endpoints().prompt_configs_url, LIST_FIELD)
        .await
}

pub async fn get(api: &ApiClient, auth: &AuthContext, key: &str) -> ApiResult<PromptConfig> {
    api.get_json(auth, &config_url(api, key)).await
}

/// `target_key` は URL 側の key。edit では元の key、create では入力された key
pub async fn save(
    api: &ApiClient,
    auth: &AuthContext,
    target_key: &str,
    payload: &PromptConfigPayload,
) -> ApiResult<PromptConfig> {
    let body = serde_json::to_value(payload)?;
    let saved: PromptConfig = api
        .send_json(auth, Method::PUT, &config_url(api, target_key), &body)
        .await?;
    tracing::info!(key = %saved.key, "prompt config saved");
    Ok(saved)
}

pub async fn delete(api: &ApiClient, auth: &AuthContext, key: &str) -> ApiResult<()> {
    api.delete(auth, &config_url(api, key)).await?;
    tracing::info!(key, "prompt config deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::test_support::{StubReply, spawn_stub};

    const CONFIG: &str = r#"{"id":3,"key":"greeting v2","system_prompt":"You are terse.","user_prompt":"Hi","is_active":true}"#;

    fn auth() -> AuthContext {
        AuthContext::new(Some("abc".into()), Some("Token".into()))
    }

    #[tokio::test]
    async fn save_is_a_single_put_to_the_encoded_key() {
        let stub = spawn_stub(|_, _| StubReply::json(StatusCode::OK, CONFIG)).await;
        let payload = PromptConfigPayload {
            key: "greeting v2".into(),
            system_prompt: "You are terse.".into(),
            user_prompt: "Hi".into(),
            is_active: true,
        };

        let saved = save(&stub.client(), &auth(), "greeting v2", &payload)
            .await
            .unwrap();

        assert_eq!(saved.id, 3);
        let hits = stub.hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].method, Method::PUT);
        assert_eq!(hits[0].path, "/prompt-configs/greeting%20v2");
        assert_eq!(hits[0].authorization.as_deref(), Some("Token abc"));
        assert_eq!(
            hits[0].json_body(),
            json!({
                "key": "greeting v2",
                "system_prompt": "You are terse.",
                "user_prompt": "Hi",
                "is_active": true
            })
        );
    }

    #[tokio::test]
    async fn save_does_not_probe_other_methods() {
        let stub = spawn_stub(|_, _| StubReply::json(StatusCode::METHOD_NOT_ALLOWED, "{}")).await;
        let payload = PromptConfigPayload {
            key: "k".into(),
            system_prompt: String::new(),
            user_prompt: String::new(),
            is_active: false,
        };

        let err = save(&stub.client(), &auth(), "k", &payload)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::METHOD_NOT_ALLOWED));
        assert_eq!(stub.hits().len(), 1);
    }

    #[tokio::test]
    async fn list_and_get_decode_configs() {
        let stub = spawn_stub(|_, path| match path {
            "/prompt-configs" => StubReply::json(StatusCode::OK, &format!("[{CONFIG}]")),
            _ => StubReply::json(StatusCode::OK, CONFIG),
        })
        .await;
        let client = stub.client();

        let all = list(&client, &auth()).await.unwrap();
        let one = get(&client, &auth(), "greeting v2").await.unwrap();

        assert_eq!(all, vec![one.clone()]);
        assert!(one.is_active);
    }

    #[tokio::test]
    async fn delete_surfaces_failures_with_detail() {
        let stub = spawn_stub(|_, _| {
            StubReply::json(StatusCode::CONFLICT, r#"{"detail":"config in use"}"#)
        })
        .await;

        let err = delete(&stub.client(), &auth(), "k").await.unwrap_err();

        assert_eq!(err.to_string(), r#"409 - {"detail":"config in use"}"#);
        assert_eq!(stub.hits()[0].method, Method::DELETE);
    }
}
