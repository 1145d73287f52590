/*
 * Responsibility
 * - /, /users 系の画面 handler (一覧 / 作成 / 編集 / 削除確認)
 * - Form を DTO で受け、validate → repo 呼び出し → redirect か再描画
 * - 読み込み失敗は AppError (エラーページ)、送信失敗はフォームの status 行
 */
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use super::{MODE_CREATE, MODE_EDIT, failed_submit, invalid_form};
use crate::{
    error::AppError,
    pages::{
        dto::{delete::DeleteForm, users::UserForm},
        extractors::auth_ctx::Auth,
    },
    repos::user_repo,
    state::AppState,
    views::{self, ViewError},
};

const HOME: &str = "/";
const NEW_ACTION: &str = "/users/new";
const RESOURCE: &str = "users";

fn user_path(user_id: i64) -> String {
    format!("/users/{user_id}")
}

fn form_page(
    mode: &str,
    action: &str,
    form: &UserForm,
    status: Option<&str>,
) -> Result<Html<String>, ViewError> {
    views::render(
        "users/form.html",
        context! { mode, action, form, status },
    )
}

fn confirm_page(
    user_id: i64,
    label: &str,
    status: Option<&str>,
) -> Result<Html<String>, ViewError> {
    let back_href = user_path(user_id);
    views::render(
        "confirm_delete.html",
        context! {
            resource => "User",
            label,
            action => format!("{back_href}/delete"),
            back_href,
            status,
        },
    )
}

async fn load_user(
    state: &AppState,
    auth: &Auth,
    user_id: i64,
) -> Result<user_repo::User, AppError> {
    user_repo::get(&state.api, &auth.0, user_id)
        .await
        .map_err(|e| {
            AppError::api(
                "Unable to Load User",
                &format!("Failed to load user {user_id}"),
                RESOURCE,
                e,
            )
        })
}

pub async fn list_users(
    State(state): State<AppState>,
    Auth(auth): Auth,
) -> Result<Html<String>, AppError> {
    let users = user_repo::list(&state.api, &auth)
        .await
        .map_err(|e| {
            AppError::api("Unable to Load Users", "Failed to load users", RESOURCE, e)
        })?;

    Ok(views::render("users/list.html", context! { users })?)
}

pub async fn new_user() -> Result<Html<String>, AppError> {
    Ok(form_page(MODE_CREATE, NEW_ACTION, &UserForm::default(), None)?)
}

pub async fn create_user(
    State(state): State<AppState>,
    Auth(auth): Auth,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let render = |status: &str| form_page(MODE_CREATE, NEW_ACTION, &form, Some(status));

    if let Err(message) = form.validate() {
        return invalid_form(message, render);
    }

    match user_repo::create(&state.api, &auth, &form.to_payload(None)).await {
        Ok(()) => {
            tracing::info!(email = %form.email.trim(), "user created");
            Ok(Redirect::to(HOME).into_response())
        }
        Err(e) => failed_submit("Failed to create user", e, render),
    }
}

pub async fn edit_user(
    State(state): State<AppState>,
    auth: Auth,
    Path(user_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let user = load_user(&state, &auth, user_id).await?;

    Ok(form_page(
        MODE_EDIT,
        &user_path(user_id),
        &UserForm::from(&user),
        None,
    )?)
}

pub async fn update_user(
    State(state): State<AppState>,
    Auth(auth): Auth,
    Path(user_id): Path<i64>,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let action = user_path(user_id);
    let render = |status: &str| form_page(MODE_EDIT, &action, &form, Some(status));

    if let Err(message) = form.validate() {
        return invalid_form(message, render);
    }

    match user_repo::update(&state.api, &auth, user_id, &form.to_payload(Some(user_id))).await {
        Ok(accepted) => {
            tracing::debug!(
                user_id,
                step = ?accepted.step,
                body = %accepted.body,
                "update accepted"
            );
            Ok(Redirect::to(HOME).into_response())
        }
        Err(e) => failed_submit("Failed to update user", e, render),
    }
}

pub async fn confirm_delete_user(
    State(state): State<AppState>,
    auth: Auth,
    Path(user_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let user = load_user(&state, &auth, user_id).await?;

    Ok(confirm_page(user_id, &user.name, None)?)
}

pub async fn delete_user(
    State(state): State<AppState>,
    Auth(auth): Auth,
    Path(user_id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    if !form.is_confirmed() {
        return Ok(Redirect::to(&format!("{}/delete", user_path(user_id))).into_response());
    }

    match user_repo::delete(&state.api, &auth, user_id).await {
        Ok(()) => {
            tracing::info!(user_id, "user deleted");
            Ok(Redirect::to(HOME).into_response())
        }
        Err(e) => {
            let label = form.label.clone().unwrap_or_else(|| format!("#{user_id}"));
            failed_submit("Failed to delete user", e, |status| {
                confirm_page(user_id, &label, Some(status))
            })
        }
    }
}
