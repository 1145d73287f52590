/*
 * Responsibility
 * - 画面側の共通エラー AppError 定義
 * - IntoResponse 実装 (エラーページ HTML / 401 は /login への redirect)
 * - 上流の ApiError を画面向けの意味に変換する (admin 権限不足, not found, その他)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;
use thiserror::Error;

use crate::services::upstream::ApiError;
use crate::views::{self, ViewError};

pub const LOGIN_PATH: &str = "/login";

const ADMIN_TITLE: &str = "Admin Access Required";
const ADMIN_HINT: &str = "Please sign in with an admin account and try again.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("admin access required")]
    AdminAccessRequired { resource: &'static str },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{title}: {message}")]
    Upstream {
        status: StatusCode,
        title: &'static str,
        message: String,
    },
    #[error(transparent)]
    View(#[from] ViewError),
}

impl AppError {
    /// 上流エラーを画面の文脈 (タイトル, "Failed to load users" など) 付きで変換する
    pub fn api(title: &'static str, action: &str, resource: &'static str, err: ApiError) -> Self {
        if err.is_admin_access_required() {
            return Self::AdminAccessRequired { resource };
        }
        match err {
            ApiError::Unauthenticated => Self::Unauthenticated,
            e @ ApiError::NotInList { .. } => Self::NotFound {
                message: e.to_string(),
            },
            e => {
                let status = match e.status() {
                    Some(s) if s == StatusCode::NOT_FOUND => StatusCode::NOT_FOUND,
                    Some(s) if s.is_client_error() => s,
                    _ => StatusCode::BAD_GATEWAY,
                };
                Self::Upstream {
                    status,
                    title,
                    message: format!("{action}: {e}"),
                }
            }
        }
    }
}

/// フォームに出す 1 行メッセージ (401 は呼び出し側で redirect 済みの前提)
pub fn status_message(action: &str, err: &ApiError) -> String {
    if err.is_admin_access_required() {
        format!("{ADMIN_TITLE}. {ADMIN_HINT}")
    } else {
        format!("{action}: {err}")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, summary, message) = match &self {
            AppError::Unauthenticated => {
                tracing::debug!("upstream rejected credentials, redirecting to login");
                return Redirect::to(LOGIN_PATH).into_response();
            }
            AppError::AdminAccessRequired { resource } => (
                StatusCode::FORBIDDEN,
                ADMIN_TITLE,
                Some(format!(
                    "Your account is authenticated but does not have permission to view {resource}."
                )),
                ADMIN_HINT.to_string(),
            ),
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "Not Found", None, message.clone())
            }
            AppError::Upstream {
                status,
                title,
                message,
            } => {
                tracing::warn!(status = status.as_u16(), %message, "upstream request failed");
                (*status, *title, None, message.clone())
            }
            AppError::View(e) => {
                tracing::error!(error = %e, "failed to render page");
                return (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
                    .into_response();
            }
        };

        match views::render("error.html", context! { title, summary, message => message.clone() }) {
            Ok(page) => (status, page).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to render error page");
                (status, message).into_response()
            }
        }
    }
}
