use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use configuration::Settings;
use database::{
    BuildingRepository, CampusRepository, PgBuildingRepository, PgCampusRepository, PgPool,
};
use services::{BuildingService, CampusService};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub campuses: CampusService,
    pub buildings: BuildingService,
}

impl AppState {
    pub fn new(
        campus_repo: Arc<dyn CampusRepository>,
        building_repo: Arc<dyn BuildingRepository>,
    ) -> Self {
        Self {
            campuses: CampusService::new(campus_repo.clone()),
            buildings: BuildingService::new(building_repo, campus_repo),
        }
    }

    /// Wires the PostgreSQL repositories over one shared pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgCampusRepository::new(pool.clone())),
            Arc::new(PgBuildingRepository::new(pool)),
        )
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin.");
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers echo the preflight.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Builds the application router. Kept separate from `run_server` so tests can
/// drive it in-process.
pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route(
            "/campuses",
            get(handlers::list_campuses).post(handlers::create_campus),
        )
        .route(
            "/campuses/:campus_id",
            get(handlers::get_campus)
                .put(handlers::update_campus)
                .delete(handlers::delete_campus),
        )
        .route(
            "/buildings",
            get(handlers::list_buildings).post(handlers::create_building),
        )
        .route(
            "/buildings/:building_id",
            get(handlers::get_building)
                .put(handlers::update_building)
                .delete(handlers::delete_building),
        )
        .route("/health", get(|| async { "OK" }));

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to the database, optionally migrates it, and serves until Ctrl-C.
pub async fn run_server(settings: Settings, migrate: bool) -> anyhow::Result<()> {
    // Note: Tracing is initialized by the binary, not here.
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database).await?;
    if migrate {
        database::run_migrations(&db_pool).await?;
    }

    let app_state = Arc::new(AppState::from_pool(db_pool.clone()));
    let app = build_router(app_state, &settings.server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Web server stopped; database pool closed.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
