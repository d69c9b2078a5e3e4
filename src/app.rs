/*
 * Responsibility
 * - Config loading → collaborator construction → Router assembly
 * - Middleware wiring (admission gate on proxied routes, HTTP layers on everything)
 * - Start with axum::serve()
 */
use axum::Router;
use std::{any::Any, panic, process, sync::Arc};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::{auth::build_admission_gate, upstream::Upstream};
use crate::state::AppState;

/// Used when RUST_LOG is unset. Admission decisions log at `info` (denials) and
/// `debug` (admits), e.g. `RUST_LOG=info,bearer_gate=debug` shows both.
const DEFAULT_LOG_FILTER: &str = "info,bearer_gate=info,tower_http=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(%location, payload = panic_message(info.payload()), "panic in gateway");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        }
        default_hook(info);
    }))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting gateway in {:?} mode on {}, upstream {}",
        config.app_env,
        config.addr,
        config.upstream_url
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, addr = %config.addr, "failed to bind");
            AppError::Internal
        })?;
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!(error = %e, "server error");
        AppError::Internal
    })?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState, AppError> {
    // Collaborators are built once here and passed in explicitly.
    let gate = build_admission_gate(config).await?;
    let upstream = Arc::new(Upstream::new(config.upstream_url.clone()));

    Ok(AppState::new(gate, upstream))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let proxied = middleware::auth::admission::apply(api::proxied(), state.clone());

    let router = Router::new()
        .merge(api::public())
        .merge(proxied)
        .with_state(state);

    middleware::http::apply(router, config.request_timeout)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::gate::AdmissionGate;
    use crate::services::auth::revocation::{InMemoryRevocationStore, RevocationStore};
    use crate::testing::{FakeValidator, UnreachableStore};

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "UPSTREAM_URL" => Some("http://127.0.0.1:9".to_string()),
            "JWT_SECRET" => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn router(store: Arc<dyn RevocationStore>) -> Router {
        let config = config();
        let gate = Arc::new(AdmissionGate::new(store, FakeValidator::accepting(&[])));
        let upstream = Arc::new(Upstream::new(config.upstream_url.clone()));
        build_router(AppState::new(gate, upstream), &config)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(literal.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "owned boom");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[tokio::test]
    async fn health_is_not_gated() {
        let app = router(Arc::new(UnreachableStore));

        let res = app.oneshot(get(api::HEALTH_PATH)).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn backend_health_is_gated_like_any_other_path() {
        let app = router(Arc::new(InMemoryRevocationStore::new()));
        let req = Request::builder()
            .method("POST")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn other_paths_are_gated() {
        for uri in ["/", "/api/users", "/api/users/1?x=y"] {
            let app = router(Arc::new(InMemoryRevocationStore::new()));

            let res = app.oneshot(get(uri)).await.unwrap();

            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert!(res.headers().contains_key("x-request-id"));
        }
    }

    #[tokio::test]
    async fn store_outage_surfaces_as_503() {
        let app = router(Arc::new(UnreachableStore));
        let req = Request::builder()
            .uri("/api/users")
            .header(header::AUTHORIZATION, "Bearer abc123")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
