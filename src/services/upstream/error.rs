/*
 * Responsibility
 * - 上流 API 呼び出しの結果を型で表す (Unauthenticated / Status / ...)
 * - UI (redirect やメッセージ) の判断はしない。pages 側が AppError に変換する
 */
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// detail として保持するレスポンスボディの最大文字数
pub const DETAIL_MAX_CHARS: usize = 200;

/// 403 の body にこれが含まれていれば admin 権限不足として扱う
pub const ADMIN_ACCESS_MARKER: &str = "Admin access required";

pub type ApiResult<T> = Result<T, ApiError>;

/// fallback chain の 1 回分の試行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401。呼び出し側が login へ誘導する
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("{}", status_line(.status, .detail))]
    Status { status: StatusCode, detail: String },

    #[error("update failed after {} attempts ({})", .attempts.len(), describe_attempts(.attempts))]
    UpdateExhausted { attempts: Vec<Attempt> },

    #[error("{resource} {id} was not found in {resource_plural} list.")]
    NotInList {
        resource: &'static str,
        resource_plural: &'static str,
        id: String,
    },

    #[error("Login failed ({}). Check credentials and auth endpoint.", .status.as_u16())]
    LoginRejected { status: StatusCode },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// status と body から Status エラーを作る (body は先頭 200 文字に切り詰める)
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            detail: truncate_detail(body),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthenticated => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } | Self::LoginRejected { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// 403 かつ body に admin marker を含むか
    pub fn is_admin_access_required(&self) -> bool {
        match self {
            Self::Status { status, detail } => {
                *status == StatusCode::FORBIDDEN && detail.contains(ADMIN_ACCESS_MARKER)
            }
            _ => false,
        }
    }
}

pub fn truncate_detail(body: &str) -> String {
    body.chars().take(DETAIL_MAX_CHARS).collect()
}

fn status_line(status: &StatusCode, detail: &str) -> String {
    if detail.is_empty() {
        status.as_u16().to_string()
    } else {
        format!("{} - {}", status.as_u16(), detail)
    }
}

fn describe_attempts(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{} {} -> {}", a.method, a.url, a.status.as_u16()))
        .collect::<Vec<_>>()
        .join(", ")
}
