/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → テンプレート検証 → 依存生成 → Router 組み立て
 * - Middleware の適用 (request id / timeout / trace / security headers)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, middleware, pages, state::AppState, views};

fn init_tracing() {
    // RUST_LOG があればそれを優先
    // 例: RUST_LOG=info,admin_ui=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development では即落として気付けるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    views::ensure_loaded()?;
    let state = AppState::from_config(&config).context("failed to build upstream client")?;

    tracing::info!(
        app_env = ?config.app_env,
        addr = %config.addr,
        api_base_url = %config.api_base_url,
        "starting admin ui"
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new().merge(pages::routes()).with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}
