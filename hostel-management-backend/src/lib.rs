//! HTTP surface of the hostel management service.
//!
//! The router is a plain function over [`AppState`] so integration tests can
//! drive it with `tower::ServiceExt::oneshot` against the in-memory store,
//! while the server binary mounts it on a TCP listener with the Postgres
//! store behind it.

pub mod actor;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use hostel_management_config::Config;
use hostel_management_records::RecordStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Config,
}

pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route(
            "/api/hostels",
            get(routes::hostels::list).post(routes::hostels::create),
        )
        .route(
            "/api/hostels/:id",
            get(routes::hostels::detail)
                .put(routes::hostels::update)
                .delete(routes::hostels::remove),
        )
        .route(
            "/api/rooms",
            get(routes::rooms::list).post(routes::rooms::create),
        )
        .route(
            "/api/rooms/:id",
            get(routes::rooms::detail)
                .put(routes::rooms::update)
                .delete(routes::rooms::remove),
        )
        .route("/api/students/register", post(routes::students::register))
        .route("/api/admin/students", get(routes::students::admin_list))
        .route(
            "/api/admin/students/:id",
            axum::routing::delete(routes::students::admin_remove),
        )
        .route(
            "/api/admin/students/:id/assign-room",
            put(routes::students::assign_room),
        )
        .route(
            "/api/student/dashboard",
            get(routes::students::dashboard),
        )
        .route(
            "/api/student/hostels",
            get(routes::students::available_hostels),
        )
        .route(
            "/api/student/hostels/:id/rooms",
            get(routes::students::available_rooms),
        )
        .route(
            "/api/student/profile",
            get(routes::students::profile).put(routes::students::update_profile),
        )
        .route(
            "/api/complaints",
            get(routes::complaints::list).post(routes::complaints::create),
        )
        .route(
            "/api/complaints/:id",
            get(routes::complaints::detail).put(routes::complaints::update),
        )
        .route(
            "/api/complaints/:id/comments",
            post(routes::complaints::comment),
        )
        .route("/api/admin/dashboard", get(routes::dashboard::overview))
        .with_state(state);
    let app = app.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(true))
                    .on_response(DefaultOnResponse::default()),
            )
            .layer(CatchPanicLayer::new()),
    );
    app.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

pub async fn run(config: Config, store: Arc<dyn RecordStore>) -> Result<(), AppError> {
    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    let app = build_router(AppState { store, config });
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutting down");
}
