use appointments_api::shared::infrastructure::connectors::cloudinary::CloudinaryConnector;
use appointments_api::shared::infrastructure::connectors::mongo::MongoConnector;
use appointments_api::shell::bootstrap::{Bootstrap, shutdown_signal};
use appointments_api::shell::config::load_configuration;
use appointments_api::shell::route_groups::RouteGroups;
use appointments_api::shell::state::ServerState;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_configuration()?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database = MongoConnector::new(config.database.clone());
    let media_host = CloudinaryConnector::new(config.media_host.clone());
    let mut bootstrap = Bootstrap::new(config, database, media_host);

    // Route groups are wired by their owning modules; unwired ones answer 501.
    let running = bootstrap.start(RouteGroups::<ServerState>::new()).await?;
    running.serve(shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}
