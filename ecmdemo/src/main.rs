use ecm_axum::start_server;
use ecm_core::models::PriceCurveQuery;
use ecm_sqlite::Db;
use ecmdemo::{AppConfig, Cli, Commands, impls::DemoApp, import_points, value_contracts};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Events go to stderr so that CSV written to stdout stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;

    let AppConfig {
        server,
        database,
        valuation,
    } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let app = DemoApp {
                db,
                valuation: Arc::new(valuation),
            };
            tokio::spawn(async move { start_server(server, app).await }).await??;
        }
        Commands::Import { path } => {
            import_points(&db, &path).await?;
        }
        Commands::Value {
            curve_name,
            financial_year,
            scenario,
            value_type,
            sort,
            ascending,
        } => {
            let query = curve_name.map(|curve_name| PriceCurveQuery {
                curve_name,
                financial_year,
                scenario,
                value_type,
            });
            let mut stdout = std::io::stdout().lock();
            value_contracts(
                &db,
                valuation,
                query.as_ref(),
                sort,
                Commands::order(ascending),
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}
