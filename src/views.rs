/*
 * Responsibility
 * - HTML テンプレート (minijinja) の読み込みと描画
 * - テンプレートはバイナリに埋め込む (templates/ 以下の .html)
 * - .html は minijinja の既定で自動エスケープされる
 */
use axum::response::Html;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("confirm_delete.html", include_str!("../templates/confirm_delete.html")),
    ("users/list.html", include_str!("../templates/users/list.html")),
    ("users/form.html", include_str!("../templates/users/form.html")),
    (
        "prompt_configs/list.html",
        include_str!("../templates/prompt_configs/list.html"),
    ),
    (
        "prompt_configs/form.html",
        include_str!("../templates/prompt_configs/form.html"),
    ),
];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("templates failed to load: {0}")]
    Unavailable(String),
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ViewError> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

static VIEWS: Lazy<Result<Views, minijinja::Error>> = Lazy::new(Views::load);

/// 起動時に呼んで、テンプレートの構文エラーで落とす
pub fn ensure_loaded() -> Result<(), ViewError> {
    views().map(|_| ())
}

fn views() -> Result<&'static Views, ViewError> {
    VIEWS
        .as_ref()
        .map_err(|e| ViewError::Unavailable(e.to_string()))
}

pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<Html<String>, ViewError> {
    Ok(Html(views()?.render(name, ctx)?))
}
