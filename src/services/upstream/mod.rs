/*
 * Responsibility
 * - 上流 API (users / prompt-configs / login) との通信層の公開インターフェース
 * - repos はここだけを見る
 */
pub mod auth;
pub mod client;
pub mod error;
pub mod fallback;
pub mod payload;
pub mod url;

pub use auth::{AuthContext, AuthDefaults};
pub use client::{ApiClient, Endpoints};
pub use error::{ApiError, ApiResult};
