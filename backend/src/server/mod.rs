//! Server construction and middleware wiring.

pub mod config;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use podium_backend::doc::ApiDoc;
use podium_backend::domain::ports::{FixtureRegistrationStore, RegistrationStore};
use podium_backend::domain::rate_limit::RateLimiter;
use podium_backend::inbound::http::health::{live, ready, HealthState};
use podium_backend::inbound::http::register::{method_not_allowed, register};
use podium_backend::inbound::http::state::HttpState;
use podium_backend::outbound::persistence::{DbPool, DieselRegistrationStore};
use podium_backend::Trace;

use config::{AppConfig, RunMode};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    app: AppConfig,
    db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from the validated app config.
    #[must_use]
    pub fn new(app: AppConfig) -> Self {
        Self { app, db_pool: None }
    }

    /// Attach a database connection pool for the persistence adapter.
    ///
    /// Without a pool the server falls back to the in-memory fixture store,
    /// which is only suitable for local development.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    run_mode: RunMode,
    allowed_origin: Option<String>,
}

fn build_cors(run_mode: RunMode, allowed_origin: Option<&str>) -> Cors {
    match run_mode {
        RunMode::Development => Cors::permissive(),
        RunMode::Production => {
            let cors = Cors::default()
                .allowed_methods(["POST"])
                .allowed_header(actix_web::http::header::CONTENT_TYPE)
                .max_age(3600);
            // Absent origin means same-origin only.
            match allowed_origin {
                Some(origin) => cors.allowed_origin(origin),
                None => cors,
            }
        }
    }
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        run_mode,
        allowed_origin,
    } = deps;

    let api = web::scope("/api")
        .wrap(build_cors(run_mode, allowed_origin.as_deref()))
        .service(
            web::resource("/register")
                .route(web::post().to(register))
                .route(web::route().to(method_not_allowed)),
        );

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server from validated configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails or, with the
/// `metrics` feature, when metric registration fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let registrations: Arc<dyn RegistrationStore> = match &config.db_pool {
        Some(pool) => Arc::new(DieselRegistrationStore::new(pool.clone())),
        None => {
            warn!("no database pool configured, using the in-memory fixture store");
            Arc::new(FixtureRegistrationStore::default())
        }
    };
    let http_state = web::Data::new(HttpState::new(registrations, Arc::new(RateLimiter::new())));

    #[cfg(feature = "metrics")]
    let prometheus = PrometheusMetricsBuilder::new("podium")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("prometheus metrics setup failed: {e}")))?;

    let server_health_state = health_state.clone();
    let run_mode = config.app.run_mode();
    let allowed_origin = config
        .app
        .allowed_origin()
        .map(|origin| origin.as_str().trim_end_matches('/').to_owned());
    let bind_addr = config.app.bind_addr();

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            run_mode,
            allowed_origin: allowed_origin.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
