use clap::{Parser, Subcommand};
use configuration::ServerOverrides;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// A REST service for university campuses and their buildings.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations, then serve the HTTP API.
    Serve(ServeArgs),
    /// Apply pending database migrations and exit.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    #[command(flatten)]
    server: ServerOverrides,

    /// Do not touch the schema on startup.
    #[arg(long)]
    skip_migrations: bool,
}

/// The main entry point for the campus registry.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment and defaults still apply.
    dotenvy::dotenv().ok();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut settings = configuration::load_config()?;

    match cli.command {
        Commands::Serve(args) => {
            settings.server.apply(&args.server);
            web_server::run_server(settings, !args.skip_migrations).await?;
        }
        Commands::Migrate => {
            let pool = database::connect(&settings.database).await?;
            database::run_migrations(&pool).await?;
            pool.close().await;
        }
    }

    Ok(())
}
