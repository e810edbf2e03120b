//! # Web Layer
//!
//! The salvo application: routes, sessions, error pages and the two
//! presentation adapters. Handlers lock the shared [`FolioApi`], run exactly
//! one API call, and turn its [`CmdResult`](crate::commands::CmdResult) into
//! a response.
//!
//! Every error response whose body is still empty (including router-level
//! 404s) goes through [`error_page`], so handlers only ever set a status.

pub mod error;
pub mod handlers;
pub mod mode;
pub mod render;
pub mod request;
pub mod templates;
pub mod users;

use crate::api::FolioApi;
use crate::config::SiteConfig;
use crate::error::{FolioError, Result};
use crate::init::FolioContext;
use crate::store::fs::FileStore;
use render::PageContext;
use salvo::affix_state;
use salvo::catcher::Catcher;
use salvo::logging::Logger;
use salvo::prelude::*;
use salvo::serve_static::StaticDir;
use salvo::session::{CookieStore, SessionHandler};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const SESSION_SECRET_MIN: usize = 64;

/// Shared by every request. The store is the only mutable part and is
/// serialized behind one lock.
pub struct AppState {
    pub api: Mutex<FolioApi<FileStore>>,
    pub config: SiteConfig,
    media_root: PathBuf,
}

impl AppState {
    pub fn new(api: FolioApi<FileStore>, config: SiteConfig) -> Self {
        let media_root = api.media().root().to_path_buf();
        Self {
            api: Mutex::new(api),
            config,
            media_root,
        }
    }

    pub fn from_context(ctx: FolioContext) -> Self {
        Self::new(ctx.api, ctx.config)
    }
}

pub fn router(media_root: PathBuf) -> Router {
    Router::new()
        .get(handlers::index)
        .push(Router::with_path("detail/{slug}").get(handlers::detail))
        .push(Router::with_path(r"archive/{year|^\d{4}$}").get(handlers::archive))
        .push(Router::with_path("category/{slug}").get(handlers::category))
        .push(Router::with_path("tag/{slug}").get(handlers::tag))
        .push(
            Router::with_path("create-non-model")
                .get(handlers::create_manual_form)
                .post(handlers::create_manual),
        )
        .push(
            Router::with_path("create")
                .get(handlers::create_form)
                .post(handlers::create),
        )
        .push(
            Router::with_path("edit/{slug}")
                .get(handlers::edit_form)
                .post(handlers::edit),
        )
        .push(
            Router::with_path("delete/{slug}")
                .get(handlers::delete_confirm)
                .post(handlers::delete)
                .delete(handlers::delete),
        )
        .push(
            Router::with_path("upload")
                .get(handlers::upload_form)
                .post(handlers::upload),
        )
        .push(Router::with_path("about").get(handlers::about))
        .push(
            Router::with_path("users")
                .push(
                    Router::with_path("register")
                        .get(users::register_form)
                        .post(users::register),
                )
                .push(
                    Router::with_path("login")
                        .get(users::login_form)
                        .post(users::login),
                )
                .push(
                    Router::with_path("logout")
                        .get(users::logout)
                        .post(users::logout),
                )
                .push(Router::with_path("profile").get(users::profile)),
        )
        .push(Router::with_path("media/{**path}").get(StaticDir::new([media_root])))
}

/// The configured session key, or a throwaway one that logs everyone out on
/// restart.
pub fn session_secret(config: &SiteConfig) -> String {
    match &config.session_secret {
        Some(secret) if secret.len() >= SESSION_SECRET_MIN => secret.clone(),
        Some(_) => {
            tracing::warn!(
                "session_secret is shorter than {} bytes; using an ephemeral key",
                SESSION_SECRET_MIN
            );
            ephemeral_secret()
        }
        None => {
            tracing::warn!("no session_secret configured; sessions end when the server stops");
            ephemeral_secret()
        }
    }
}

fn ephemeral_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

pub fn service(state: AppState) -> Result<Service> {
    let secret = session_secret(&state.config);
    let session = SessionHandler::builder(CookieStore::new(), secret.as_bytes())
        .build()
        .map_err(|e| FolioError::Api(format!("session setup failed: {}", e)))?;
    let router = router(state.media_root.clone());

    Ok(Service::new(router)
        .hoop(Logger::new())
        .hoop(affix_state::inject(Arc::new(state)))
        .hoop(session)
        .catcher(Catcher::default().hoop(error_page)))
}

fn error_message(code: StatusCode) -> &'static str {
    match code {
        StatusCode::BAD_REQUEST => "The request could not be understood.",
        StatusCode::FORBIDDEN => "You do not have permission to view this page.",
        StatusCode::NOT_FOUND => "The page you are looking for does not exist.",
        _ => "Something went wrong on our side. Please try again later.",
    }
}

/// Renders the static error page for any error status left without a body.
#[handler]
async fn error_page(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    let code = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let config = depot
        .obtain::<Arc<AppState>>()
        .map(|state| state.config.clone())
        .unwrap_or_default();
    let page = PageContext::new(&config, code.canonical_reason().unwrap_or("Error"));
    match page.render(
        templates::ERROR,
        json!({ "code": code.as_u16(), "message": error_message(code) }),
    ) {
        Ok(html) => res.render(Text::Html(html)),
        Err(e) => {
            tracing::error!(error = %e, "error page failed to render");
            res.render(Text::Plain(error_message(code)));
        }
    }
    ctrl.skip_rest();
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(ctx: FolioContext) -> Result<()> {
    let bind = ctx.config.bind.clone();
    let service = service(AppState::from_context(ctx))?;
    tracing::info!(address = %bind, "listening");
    let acceptor = TcpListener::new(bind).bind().await;
    Server::new(acceptor).serve(service).await;
    Ok(())
}
