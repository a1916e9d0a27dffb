//! Itemstore server binary.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::info;

use itemstore_server::logging;
use itemstore_server::server::{AppServer, ServerConfig, TraceConfig};
use itemstore_server::settings::Settings;
use itemstore_storage::{Database, SqliteItemRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    // Fatal if the log directory cannot be created or sinks fail to install.
    let _log_guard = logging::init(&settings.log_config())?;

    info!(
        "[Server] {} starting (env: {})",
        settings.app_name, settings.app_env
    );

    let db = Database::open(&settings.database_path)
        .with_context(|| format!("Failed to open database at {:?}", settings.database_path))?;
    let items = Arc::new(SqliteItemRepository::new(Arc::new(Mutex::new(db))));

    let server = AppServer::new(
        ServerConfig {
            host: settings.host.clone(),
            port: settings.port,
        },
        TraceConfig {
            adopt_client_id: settings.adopt_request_id,
        },
        items,
    );

    server.run().await
}
