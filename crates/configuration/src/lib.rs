use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use settings::ServerOverrides;
pub use settings::{DatabaseSettings, ServerSettings, Settings};

/// The optional settings file, looked up as `campus.toml` in the working directory.
pub const CONFIG_FILE: &str = "campus";

/// Environment variables and the setting each one overrides.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_HOST", "database.host"),
    ("DATABASE_PORT", "database.port"),
    ("DATABASE_NAME", "database.name"),
    ("DATABASE_USER", "database.user"),
    ("DATABASE_PASSWORD", "database.password"),
    ("DATABASE_POOL_MIN", "database.min_connections"),
    ("DATABASE_POOL_MAX", "database.max_connections"),
    ("DATABASE_ACQUIRE_TIMEOUT_SECS", "database.acquire_timeout_secs"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
];

/// Loads the application configuration from `campus.toml` and the process environment.
///
/// Sources are layered: built-in defaults, then the file (if present), then
/// environment variables such as `DATABASE_HOST`.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_with(Some(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Same as [`load_config`], with the file name and the environment lookup supplied by the caller.
pub fn load_config_with<F>(file: Option<&str>, lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = config::Config::builder()
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.name", "university_db")?
        .set_default("database.user", "postgres")?
        .set_default("database.password", "12345")?
        .set_default("database.min_connections", 1)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default(
            "server.allowed_origins",
            vec![
                "http://localhost:5173",
                "http://127.0.0.1:5173",
                "http://localhost:8000",
            ],
        )?;

    if let Some(name) = file {
        builder = builder.add_source(config::File::with_name(name).required(false));
    }

    for (var, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(*key, lookup(var))?;
    }

    let origins = lookup("CORS_ALLOWED_ORIGINS").map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    builder = builder.set_override_option("server.allowed_origins", origins)?;

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(database = ?settings.database, server = ?settings.server, "Configuration loaded.");
    Ok(settings)
}
