/*
 * Responsibility
 * - /prompt-configs 系の画面 handler (一覧 / 作成 / 編集 / 削除確認)
 * - key は作成後に変更しない。編集時の PUT 先は URL の key
 * - 保存後は上流が返した key の編集画面へ redirect
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
        dto::{
            delete::DeleteForm,
            prompt_configs::{PromptConfigForm, PromptConfigRow, PromptConfigView},
        },
        extractors::auth_ctx::Auth,
    },
    repos::prompt_config_repo,
    services::upstream::url::encode_segment,
    state::AppState,
    views::{self, ViewError},
};

const LIST_PATH: &str = "/prompt-configs";
const NEW_ACTION: &str = "/prompt-configs/new";
const RESOURCE: &str = "prompt configs";

fn config_path(key: &str) -> String {
    format!("{LIST_PATH}/{}", encode_segment(key))
}

fn form_page(
    mode: &str,
    action: &str,
    form: &PromptConfigView,
    status: Option<&str>,
) -> Result<Html<String>, ViewError> {
    views::render(
        "prompt_configs/form.html",
        context! { mode, action, form, status },
    )
}

fn confirm_page(key: &str, status: Option<&str>) -> Result<Html<String>, ViewError> {
    let back_href = config_path(key);
    views::render(
        "confirm_delete.html",
        context! {
            resource => "Prompt Config",
            label => key,
            action => format!("{back_href}/delete"),
            back_href,
            status,
        },
    )
}

async fn load_config(
    state: &AppState,
    auth: &Auth,
    key: &str,
) -> Result<prompt_config_repo::PromptConfig, AppError> {
    prompt_config_repo::get(&state.api, &auth.0, key)
        .await
        .map_err(|e| {
            AppError::api(
                "Unable to Load Prompt Config",
                &format!("Failed to load prompt config {key}"),
                RESOURCE,
                e,
            )
        })
}

pub async fn list_prompt_configs(
    State(state): State<AppState>,
    Auth(auth): Auth,
) -> Result<Html<String>, AppError> {
    let configs = prompt_config_repo::list(&state.api, &auth)
        .await
        .map_err(|e| {
            AppError::api(
                "Unable to Load Prompt Configs",
                "Failed to load prompt configs",
                RESOURCE,
                e,
            )
        })?;

    let prompt_configs: Vec<PromptConfigRow> =
        configs.iter().map(PromptConfigRow::from).collect();
    Ok(views::render(
        "prompt_configs/list.html",
        context! { prompt_configs },
    )?)
}

pub async fn new_prompt_config() -> Result<Html<String>, AppError> {
    Ok(form_page(
        MODE_CREATE,
        NEW_ACTION,
        &PromptConfigView::blank(),
        None,
    )?)
}

pub async fn create_prompt_config(
    State(state): State<AppState>,
    Auth(auth): Auth,
    Form(form): Form<PromptConfigForm>,
) -> Result<Response, AppError> {
    let view = form.view(&form.key);
    let render = |status: &str| form_page(MODE_CREATE, NEW_ACTION, &view, Some(status));

    if let Err(message) = form.validate_new() {
        return invalid_form(message, render);
    }

    let key = form.key.trim();
    match prompt_config_repo::save(&state.api, &auth, key, &form.to_payload(key)).await {
        Ok(saved) => Ok(Redirect::to(&config_path(&saved.key)).into_response()),
        Err(e) => failed_submit("Failed to save prompt config", e, render),
    }
}

pub async fn edit_prompt_config(
    State(state): State<AppState>,
    auth: Auth,
    Path(key): Path<String>,
) -> Result<Html<String>, AppError> {
    let config = load_config(&state, &auth, &key).await?;

    Ok(form_page(
        MODE_EDIT,
        &config_path(&key),
        &PromptConfigView::from(&config),
        None,
    )?)
}

pub async fn update_prompt_config(
    State(state): State<AppState>,
    Auth(auth): Auth,
    Path(key): Path<String>,
    Form(form): Form<PromptConfigForm>,
) -> Result<Response, AppError> {
    // disabled な key input は送られてこないので URL の key を使う
    let action = config_path(&key);
    let view = form.view(&key);

    match prompt_config_repo::save(&state.api, &auth, &key, &form.to_payload(&key)).await {
        Ok(saved) => Ok(Redirect::to(&config_path(&saved.key)).into_response()),
        Err(e) => failed_submit("Failed to save prompt config", e, |status| {
            form_page(MODE_EDIT, &action, &view, Some(status))
        }),
    }
}

pub async fn confirm_delete_prompt_config(
    State(state): State<AppState>,
    auth: Auth,
    Path(key): Path<String>,
) -> Result<Html<String>, AppError> {
    let config = load_config(&state, &auth, &key).await?;

    Ok(confirm_page(&config.key, None)?)
}

pub async fn delete_prompt_config(
    State(state): State<AppState>,
    Auth(auth): Auth,
    Path(key): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    if !form.is_confirmed() {
        return Ok(Redirect::to(&format!("{}/delete", config_path(&key))).into_response());
    }

    match prompt_config_repo::delete(&state.api, &auth, &key).await {
        Ok(()) => Ok(Redirect::to(LIST_PATH).into_response()),
        Err(e) => failed_submit("Failed to delete prompt config", e, |status| {
            confirm_page(&key, Some(status))
        }),
    }
}
