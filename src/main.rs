use log::info;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use reelscript::config::AppConfig;
use reelscript::providers::ProviderFactory;
use reelscript::server::{router, AppState};
use reelscript::sources::AirtableSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::init();

    let config = AppConfig::load()?;

    let source = AirtableSource::new(&config.airtable, config.timeout.map(Duration::from_secs))?;
    let provider = ProviderFactory::get_default_provider(&config)?;
    info!("Using {} for script generation", provider.provider_name());

    let state = AppState {
        source: Arc::new(source),
        provider: Arc::from(provider),
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on http://{}", config.server.bind);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
