use actix_web::{web, App, HttpServer};
use base_network_utils::{api, config::Config, BaseNetworkUtils};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// Sets up logging, loads configuration, builds the Base utilities and
/// serves them over HTTP.
#[actix_web::main]
async fn main() -> eyre::Result<()> {
    // Our crate at info, dependencies quieter
    let filter = EnvFilter::from_default_env()
        .add_directive("base_network_utils=info".parse()?)
        .add_directive("actix_web=error".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(?config, "loaded configuration");

    let utils = Arc::new(BaseNetworkUtils::with_rpc_url(
        config.network.as_str(),
        config.rpc_url(),
        config.private_key.as_deref(),
    )?);

    // Startup probe only; the service still starts if the node is unreachable
    match utils.health().await {
        Ok(health) if health.chain_matches => {
            info!(latest_block = health.latest_block, "connected to {}", utils.network().name)
        }
        Ok(health) => warn!(
            expected = utils.network().chain_id,
            actual = health.chain_id,
            "RPC endpoint serves a different chain"
        ),
        Err(e) => warn!("RPC endpoint not reachable at startup: {}", e),
    }

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(utils.clone()))
            .configure(api::configure)
    })
    .workers(4)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
