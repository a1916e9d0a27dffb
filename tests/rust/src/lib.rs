//! Shared test utilities and fixtures for Itemstore integration tests.

pub use itemstore_server::server::{TraceConfig, REQUEST_ID_HEADER};

/// Database test helpers
pub mod db {
    use itemstore_storage::Database;

    /// In-memory database with migrations applied.
    pub struct TestDatabase {
        pub db: Database,
    }

    impl TestDatabase {
        pub fn new() -> Self {
            let db = Database::open_in_memory().expect("Failed to open in-memory database");
            Self { db }
        }
    }

    impl Default for TestDatabase {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// End-to-end HTTP harness
pub mod http {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use itemstore_server::server::{AppServer, ServerConfig, TraceConfig};
    use itemstore_storage::SqliteItemRepository;

    use crate::db::TestDatabase;

    /// A full Itemstore server on an ephemeral port, backed by an
    /// in-memory database, with a reqwest client pointed at it.
    pub struct TestApp {
        pub addr: SocketAddr,
        pub client: reqwest::Client,
    }

    impl TestApp {
        pub async fn spawn() -> Self {
            Self::spawn_with(TraceConfig::default()).await
        }

        pub async fn spawn_with(trace_config: TraceConfig) -> Self {
            let test_db = TestDatabase::new();
            let items = Arc::new(SqliteItemRepository::new(Arc::new(Mutex::new(test_db.db))));

            let server = AppServer::new(ServerConfig::default(), trace_config, items);
            let router = server.build_router();

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind test listener");
            let addr = listener.local_addr().expect("Failed to read local addr");

            tokio::spawn(async move {
                axum::serve(
                    listener,
                    router.into_make_service_with_connect_info::<SocketAddr>(),
                )
                .await
                .expect("Test server exited");
            });

            Self {
                addr,
                client: reqwest::Client::new(),
            }
        }

        pub fn url(&self, path: &str) -> String {
            format!("http://{}{}", self.addr, path)
        }

        pub async fn get(&self, path: &str) -> reqwest::Response {
            self.client
                .get(self.url(path))
                .send()
                .await
                .expect("GET request failed")
        }

        pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
            self.client
                .post(self.url(path))
                .json(body)
                .send()
                .await
                .expect("POST request failed")
        }
    }
}
