use image_upload_gateway::{
    config::Config, routes::create_router, server, storage::R2Store, utils::init_logger, AppState,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env().inspect_err(|e| error!("{}", e))?;
    info!("Configuration loaded: {:?}", config.server);

    // Connect storage
    let store = R2Store::new(&config.storage)
        .inspect_err(|e| error!("Failed to create R2 client: {}", e))?;
    info!("Storage client ready for bucket {}", store.bucket_name());

    let state = AppState::new(config.clone(), Arc::new(store));
    let app = create_router(state);

    server::serve(app, &config.server).await
}
