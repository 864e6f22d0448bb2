use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{bail, Context};
use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use catalog::Catalog;
use registration::{
    MissingRelay, RegistrationForm, RegistrationRelay, RelayConfig, Web3FormsRelay,
};
use shared::error::{ApiError, ErrorCode};
use site::{PageStatus, RegistrationView, Site, SiteSettings, STYLESHEET};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use tracing::{info, warn};

mod api;
mod app_state;
mod config;

use api::{register_for_event, register_route, ApiContext, RegistrationOutcome};
use app_state::AppState;
use config::{load_settings, prepare_assets_dir, Settings};

const MAX_FORM_BYTES: usize = 16 * 1024;
const HEALTHZ_ROUTE: &str = "/healthz";
const INDEX_ROUTE: &str = "/";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let catalog = match settings.catalog_path.as_deref() {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load event catalog '{path}'"))?,
        None => Catalog::builtin().context("built-in event catalog is invalid")?,
    };
    info!(events = catalog.len(), "event catalog loaded");

    let assets_dir = prepare_assets_dir(settings.assets_dir.as_deref())?;
    let state = build_state(catalog, build_relay(&settings), site_settings(&settings));
    let app = build_router(state, assets_dir)?;

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_relay(settings: &Settings) -> Arc<dyn RegistrationRelay> {
    match settings.relay_access_key.as_deref() {
        Some(access_key) => {
            let mut config =
                RelayConfig::new(access_key).with_endpoint(settings.relay_endpoint.as_str());
            config.recipient = settings.relay_recipient.clone();
            Arc::new(Web3FormsRelay::new(config))
        }
        None => {
            warn!("no relay access key configured; registrations will be refused");
            Arc::new(MissingRelay)
        }
    }
}

fn site_settings(settings: &Settings) -> SiteSettings {
    let mut site = SiteSettings::default();
    if let Some(url) = &settings.main_site_url {
        site.main_site_url = url.clone();
    }
    site
}

fn build_state(
    catalog: Catalog,
    relay: Arc<dyn RegistrationRelay>,
    site_settings: SiteSettings,
) -> Arc<AppState> {
    let catalog = Arc::new(catalog);
    Arc::new(AppState {
        api: ApiContext {
            catalog: catalog.clone(),
            relay,
        },
        site: Site::new(catalog, site_settings),
    })
}

/// Event pages get one route each so that anything else, including image paths at the
/// site root, falls through to the assets directory.
fn build_router(state: Arc<AppState>, assets_dir: Option<PathBuf>) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .route(HEALTHZ_ROUTE, get(healthz))
        .route(INDEX_ROUTE, get(index));
    let mut reserved = vec![HEALTHZ_ROUTE, INDEX_ROUTE];

    let stylesheet_path = state.site.settings().stylesheet_path.as_str();
    if stylesheet_path.starts_with('/') && stylesheet_path.len() > 1 {
        router = router.route(stylesheet_path, get(stylesheet));
        reserved.push(stylesheet_path);
    }

    for event_id in state.site.catalog().ids() {
        let page_route = format!("/{event_id}");
        let form_route = register_route(event_id.as_str());
        if let Some(taken) = reserved
            .iter()
            .find(|route| **route == page_route || **route == form_route)
        {
            bail!("event id '{event_id}' collides with the built-in route '{taken}'");
        }
        router = router.merge(event_routes(event_id.as_str()));
    }

    let not_found_html = state.site.render_not_found();
    let not_found = move || {
        let html = not_found_html.clone();
        async move { (StatusCode::NOT_FOUND, Html(html)) }
    };
    let router = match assets_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.into_service()),
        ),
        None => router.fallback(not_found),
    };

    Ok(router
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .with_state(state))
}

fn event_routes(event_id: &str) -> Router<Arc<AppState>> {
    let page_id = event_id.to_string();
    let register_id = event_id.to_string();
    Router::new()
        .route(
            &format!("/{event_id}"),
            get(move |State(state): State<Arc<AppState>>| {
                let event_id = page_id.clone();
                async move { event_page(&state, &event_id) }
            }),
        )
        .route(
            &register_route(event_id),
            post(
                move |State(state): State<Arc<AppState>>, Form(form): Form<RegistrationForm>| {
                    let event_id = register_id.clone();
                    async move { register(&state, &event_id, form).await }
                },
            ),
        )
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.site.render_index())
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

fn event_page(state: &AppState, event_id: &str) -> Response {
    let page = state.site.render_event(event_id);
    let status = match page.status {
        PageStatus::Found => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
    };
    (status, Html(page.html)).into_response()
}

async fn register(state: &AppState, event_id: &str, form: RegistrationForm) -> Response {
    let outcome = match register_for_event(&state.api, event_id, form).await {
        Ok(outcome) => outcome,
        Err(error) => return error_page(state, event_id, error),
    };

    match outcome {
        RegistrationOutcome::Submitted => match state.site.catalog().find_by_id(event_id) {
            Some(event) => Html(state.site.render_confirmation(event)).into_response(),
            None => event_page(state, event_id),
        },
        RegistrationOutcome::Invalid { form, error } => registration_page(
            state,
            event_id,
            StatusCode::UNPROCESSABLE_ENTITY,
            &form,
            &error,
        ),
        RegistrationOutcome::Rejected { form, message } => {
            registration_page(state, event_id, StatusCode::BAD_GATEWAY, &form, &message)
        }
    }
}

fn registration_page(
    state: &AppState,
    event_id: &str,
    status: StatusCode,
    form: &RegistrationForm,
    error: &str,
) -> Response {
    let page = state.site.render_event_with_registration(
        event_id,
        Some(RegistrationView {
            form,
            error: Some(error),
            open: true,
        }),
    );
    (status, Html(page.html)).into_response()
}

fn error_page(state: &AppState, event_id: &str, error: ApiError) -> Response {
    let status = status_for(error.code);
    warn!(event = %event_id, %error, %status, "registration request refused");
    let html = match error.code {
        ErrorCode::NotFound => state.site.render_not_found(),
        _ => state.site.render_event(event_id).html,
    };
    (status, Html(html)).into_response()
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::RegistrationClosed => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
