#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    admin_api::PostgresAdminApi, config::RuntimeConfiguration, routes::router,
    state::CourseAdminState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod admin_api;
mod config;
mod data;
mod error;
mod maud_conveniences;
mod routes;
mod state;
mod validation;

async fn shutdown_signal(state: CourseAdminState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    state.sensible_shutdown().await;
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        warn!(?e, "no .env file loaded, relying on the environment");
    }

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let options = PgPoolOptions::new().max_connections(config.db_config().max_connections());
    let api = PostgresAdminApi::connect(options, &config)
        .await
        .expect("unable to connect to database");
    let state = CourseAdminState::new(Arc::new(api));

    let app = router(state.clone()).layer(TraceLayer::new_for_http());

    let server_ip = config.server_ip();
    let listener = TcpListener::bind(server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("unable to serve app");
}
