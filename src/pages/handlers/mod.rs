/*
 * Responsibility
 * - 画面ごとの handler (users / prompt_configs / login / health)
 * - フォーム送信の失敗を共通の形で返す
 *   - 401 は AppError::Unauthenticated (= /login へ redirect)
 *   - それ以外は入力値を保ったままフォームを status 行付きで描き直す
 */
pub mod health;
pub mod login;
pub mod prompt_configs;
pub mod users;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, status_message};
use crate::services::upstream::ApiError;
use crate::views::ViewError;

const MODE_CREATE: &str = "create";
const MODE_EDIT: &str = "edit";

/// 入力チェックで弾いた時の再描画 (422)
fn invalid_form<F>(message: &str, render: F) -> Result<Response, AppError>
where
    F: FnOnce(&str) -> Result<Html<String>, ViewError>,
{
    Ok((StatusCode::UNPROCESSABLE_ENTITY, render(message)?).into_response())
}

/// 上流で失敗した時の再描画。status 行は `<action>: <error>`
fn failed_submit<F>(action: &str, err: ApiError, render: F) -> Result<Response, AppError>
where
    F: FnOnce(&str) -> Result<Html<String>, ViewError>,
{
    if err.is_unauthenticated() {
        return Err(AppError::Unauthenticated);
    }
    tracing::warn!(action, error = %err, "form submission failed");

    let status = match err.status() {
        Some(s) if s.is_client_error() => s,
        _ => StatusCode::BAD_GATEWAY,
    };
    let message = status_message(action, &err);
    Ok((status, render(&message)?).into_response())
}
