//! Common test utilities and fixtures for integration tests.
//!
//! Every test gets its own store seeded from the fixture catalog. Most run
//! in memory; `on_disk` backs the store with a scratch directory.

#![allow(dead_code)]

pub mod fixtures;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use vocab_core::Catalog;
use vocab_drill_server::store::Store;
use vocab_drill_server::{router, AppState};

/// Test context holding the shared store and the app router.
pub struct TestContext {
    pub store: Arc<Store>,
    app: Router,
}

impl TestContext {
    /// Context over the fixture catalog.
    pub fn new() -> Self {
        Self::with_catalog(fixtures::catalog())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::with_store(Store::in_memory(catalog))
    }

    pub fn with_store(store: Store) -> Self {
        let store = Arc::new(store);
        let app = router(AppState {
            store: store.clone(),
        });
        Self { store, app }
    }

    /// Context over a store saving into a fresh scratch directory.
    ///
    /// Returns the directory; state files live in its `data` subdirectory.
    pub fn on_disk(name: &str) -> (Self, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "vocab-api-{name}-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let catalog_path = dir.join("vocabulary.json");
        std::fs::write(&catalog_path, fixtures::CATALOG_JSON).unwrap();

        let store = Store::open(&dir.join("data"), &catalog_path).unwrap();
        (Self::with_store(store), dir)
    }

    /// Replace the data directory with a plain file so every save fails.
    pub fn break_data_dir(dir: &std::path::Path) {
        let data_dir = dir.join("data");
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "not a directory").unwrap();
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}
