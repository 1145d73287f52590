/*
 * Responsibility
 * - 画面の URL 構造を定義
 * - /users/{id} と /prompt-configs/{key} は GET で表示、POST で送信 (HTML form は PUT/DELETE を持たない)
 * - 削除は GET で確認画面、POST (confirm=yes) で実行
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::pages::handlers::{
    health::health,
    login::{login, login_form, logout},
    prompt_configs::{
        confirm_delete_prompt_config, create_prompt_config, delete_prompt_config,
        edit_prompt_config, list_prompt_configs, new_prompt_config, update_prompt_config,
    },
    users::{
        confirm_delete_user, create_user, delete_user, edit_user, list_users, new_user,
        update_user,
    },
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .route("/", get(list_users))
        .route("/users", get(list_users))
        .route("/users/new", get(new_user).post(create_user))
        .route("/users/{user_id}", get(edit_user).post(update_user))
        .route(
            "/users/{user_id}/delete",
            get(confirm_delete_user).post(delete_user),
        )
        .route("/prompt-configs", get(list_prompt_configs))
        .route(
            "/prompt-configs/new",
            get(new_prompt_config).post(create_prompt_config),
        )
        .route(
            "/prompt-configs/{key}",
            get(edit_prompt_config).post(update_prompt_config),
        )
        .route(
            "/prompt-configs/{key}/delete",
            get(confirm_delete_prompt_config).post(delete_prompt_config),
        )
}
