use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    serve::Serve,
    Json, Router,
};

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::Level;

use domain::GymAPIError;
pub mod routes;
use crate::utils::{constants, tracing::*};
use routes::{api, pages};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl GymAPIError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GymAPIError::IDNotFoundError(_) => StatusCode::NOT_FOUND,
            GymAPIError::ReferentialIntegrityError(_) => StatusCode::CONFLICT,
            GymAPIError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GymAPIError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to a client. Unexpected errors are only logged.
    pub fn client_message(&self) -> String {
        match self {
            GymAPIError::IDNotFoundError(_) => self.to_string(),
            GymAPIError::ReferentialIntegrityError(message) => {
                message.to_owned()
            }
            GymAPIError::ValidationError(message) => format!("{message}"),
            GymAPIError::UnexpectedError(_) => "Unexpected error".to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            GymAPIError::UnexpectedError(_) => {
                log_error_chain(self, Level::ERROR)
            }
            _ => log_error_chain(self, Level::DEBUG),
        }
    }
}

impl IntoResponse for GymAPIError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(ErrorResponse {
            error: self.client_message(),
        });
        (self.status_code(), body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub fn router(app_state: AppState) -> Result<Router, Box<dyn Error>> {
    let allowed_origins = constants::prod::ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allowed_origins);

    let router = Router::new()
        .route("/", get(pages::home))
        .merge(pages::trainer_routes())
        .merge(pages::member_routes())
        .merge(pages::gym_class_routes())
        .merge(api::trainer_routes())
        .merge(api::member_routes())
        .merge(api::gym_class_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(app_state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );

    Ok(router)
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let router = router(app_state)?;

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(constants::MAX_DB_CONNECTIONS)
        .connect(url.expose_secret())
        .await
}
