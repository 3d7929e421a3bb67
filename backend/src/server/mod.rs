//! Server construction and middleware wiring.

mod config;

pub use config::{ConfigError, DatabaseConfig, ServerConfig};

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::comments::{create_comment, list_comments};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::json_error_config;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, DieselCommentRepository, PoolConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations before the server accepts traffic.
///
/// The migration harness is synchronous, so it runs on a blocking thread
/// with its own short-lived connection rather than borrowing from the pool.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = diesel::PgConnection::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        Ok::<_, std::io::Error>(())
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task panicked: {e}")))?
}

/// Assemble the application with routing, CORS, and (in debug builds) the
/// Swagger UI.
///
/// The browser client is served from a different origin, so CORS stays
/// permissive as the API is deliberately unauthenticated and public.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        // The CORS middleware rewraps response bodies.
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .wrap(Cors::permissive())
        .app_data(json_error_config())
        .app_data(http_state)
        .app_data(health_state)
        .service(list_comments)
        .service(create_comment)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Run the comment service until shutdown.
///
/// Builds the connection pool, applies migrations, and only then flips the
/// readiness probe so traffic never lands on an unmigrated database.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let database_url = config.database.url();
    run_migrations(database_url.clone()).await?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("pool construction failed: {e}")))?;

    let http_state = web::Data::new(HttpState::new(Arc::new(DieselCommentRepository::new(pool))));
    let health_state = web::Data::new(HealthState::new());

    let server_http_state = http_state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_http_state.clone(), server_health_state.clone())
    })
    .bind(("0.0.0.0", config.port))?;

    health_state.mark_ready();
    info!(port = config.port, "comment service listening");
    server.run().await
}
