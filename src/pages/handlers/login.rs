/*
 * Responsibility
 * - GET/POST /login, POST /logout
 * - 上流の login endpoint で token を取得し、token / token_type を cookie に保存する
 * - cookie は Path=/, SameSite=Lax, HttpOnly。production では Secure も付ける
 */
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use minijinja::context;

use crate::{
    error::{AppError, LOGIN_PATH},
    pages::dto::login::LoginForm,
    services::upstream::ApiError,
    state::{AppState, AuthCookies},
    views::{self, ViewError},
};

const AFTER_LOGIN: &str = "/";

fn login_page(username: &str, status: Option<&str>) -> Result<Html<String>, ViewError> {
    views::render("login.html", context! { username, status })
}

fn auth_cookie(settings: &AuthCookies, name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(settings.secure)
        .build()
}

pub async fn login_form() -> Result<Html<String>, AppError> {
    Ok(login_page("", None)?)
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.api.login(&form.username, &form.password).await {
        Ok(issued) => {
            tracing::info!(username = %form.username, "login succeeded");
            let settings = &state.cookies;
            let jar = jar
                .add(auth_cookie(settings, &settings.token_name, issued.token))
                .add(auth_cookie(
                    settings,
                    &settings.token_type_name,
                    issued.token_type,
                ));
            Ok((jar, Redirect::to(AFTER_LOGIN)).into_response())
        }
        Err(e) => {
            tracing::warn!(username = %form.username, error = %e, "login failed");
            let (status, message) = match &e {
                ApiError::LoginRejected { .. } => (StatusCode::UNAUTHORIZED, e.to_string()),
                _ => (StatusCode::BAD_GATEWAY, format!("Login failed: {e}")),
            };
            Ok((status, login_page(&form.username, Some(&message))?).into_response())
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar
        .remove(Cookie::build((state.cookies.token_name.clone(), "")).path("/"))
        .remove(Cookie::build((state.cookies.token_type_name.clone(), "")).path("/"));
    (jar, Redirect::to(LOGIN_PATH))
}
