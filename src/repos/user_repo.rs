/*
 * Responsibility
 * - 上流 API の users リソースに対する CRUD
 * - ApiClient と AuthContext を受け取り、ApiError を返す (画面遷移は pages 側)
 * - 更新は method fallback chain (services::upstream::fallback) を回す
 */
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::upstream::{
    ApiClient, ApiError, ApiResult, AuthContext,
    client::{ensure_success, into_failure},
    error::Attempt,
    fallback::{self, Transition, UpdateStep},
    url::item_url,
};

/// `{ users: [...] }` で包まれて返ってくる場合のフィールド名
const LIST_FIELD: &str = "users";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// create / update で送る body。create 時は id を送らない
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// fallback chain で採用されたレスポンス
#[derive(Debug, Clone)]
pub struct AcceptedUpdate {
    pub step: UpdateStep,
    // 空 body や JSON でない body は Null
    pub body: Value,
}

pub async fn list(api: &ApiClient, auth: &AuthContext) -> ApiResult<Vec<User>> {
    api.get_list(auth, &api.endpoints().users_url, LIST_FIELD)
        .await
}

pub async fn get(api: &ApiClient, auth: &AuthContext, user_id: i64) -> ApiResult<User> {
    let url = item_url(&api.endpoints().users_url, &user_id.to_string());

    match api.get_json::<User>(auth, &url).await {
        // 単体取得を持たない API もあるので一覧から探す
        Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
            tracing::debug!(user_id, "user item endpoint returned 404, searching the list");
            list(api, auth)
                .await?
                .into_iter()
                .find(|u| u.id == user_id)
                .ok_or_else(|| ApiError::NotInList {
                    resource: "User",
                    resource_plural: "users",
                    id: user_id.to_string(),
                })
        }
        other => other,
    }
}

pub async fn create(
    api: &ApiClient,
    auth: &AuthContext,
    payload: &UserPayload,
) -> ApiResult<()> {
    let body = serde_json::to_value(payload)?;
    let res = api
        .send(auth, Method::POST, &api.endpoints().users_url, Some(&body))
        .await?;
    ensure_success(res).await?;
    Ok(())
}

pub async fn update(
    api: &ApiClient,
    auth: &AuthContext,
    user_id: i64,
    payload: &UserPayload,
) -> ApiResult<AcceptedUpdate> {
    let body = serde_json::to_value(payload)?;
    let collection_url = api.endpoints().users_url.clone();
    let item = item_url(&collection_url, &user_id.to_string());

    let mut attempts = Vec::new();
    let mut step = UpdateStep::FIRST;

    loop {
        let url = if step.targets_collection() {
            &collection_url
        } else {
            &item
        };
        let method = step.method();
        let res = api.send(auth, method.clone(), url, Some(&body)).await?;
        let status = res.status();

        match fallback::transition(step, status) {
            Transition::Accept => {
                let bytes = res.bytes().await?;
                let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
                tracing::info!(user_id, ?step, status = status.as_u16(), "user updated");
                return Ok(AcceptedUpdate { step, body });
            }
            Transition::Advance(next) => {
                tracing::warn!(
                    user_id,
                    %method,
                    %url,
                    status = status.as_u16(),
                    ?next,
                    "update method rejected, trying next"
                );
                attempts.push(Attempt {
                    method,
                    url: url.clone(),
                    status,
                });
                step = next;
            }
            Transition::Exhausted => {
                attempts.push(Attempt {
                    method,
                    url: url.clone(),
                    status,
                });
                tracing::warn!(user_id, attempts = attempts.len(), "user update exhausted");
                return Err(ApiError::UpdateExhausted { attempts });
            }
            // 401 は Unauthenticated、それ以外は Status
            Transition::Abort => return Err(into_failure(res).await),
        }
    }
}

pub async fn delete(api: &ApiClient, auth: &AuthContext, user_id: i64) -> ApiResult<()> {
    let url = item_url(&api.endpoints().users_url, &user_id.to_string());
    api.delete(auth, &url).await
}
