use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is bounded by `min_connections..=max_connections`. A request that
/// finds every connection borrowed waits at most `acquire_timeout` before the
/// borrow fails with [`DbError::PoolTimedOut`]. Connections go back to the pool
/// as soon as the query future that borrowed them completes, whatever its outcome.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .database(&settings.name)
        .username(&settings.user)
        .password(&settings.password);

    let pool = PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect_with(options)
        .await
        .map_err(DbError::ConnectionError)?;

    tracing::info!(
        host = %settings.host,
        database = %settings.name,
        max_connections = settings.max_connections,
        "Database pool established."
    );
    Ok(pool)
}

/// Applies the embedded migrations, creating `campuses` and `buildings` on a fresh database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}
