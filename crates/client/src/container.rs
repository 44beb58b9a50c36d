//! Wiring: repositories for the configured data source, use cases on top,
//! stores on top of those.

use std::sync::Arc;

use crate::config::{ClientConfig, DataSource};
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::mock::{
    MockAuthRepository, MockInventoryRepository, MockPickingRepository, MockStockInRepository,
    MockStockOutRepository,
};
use crate::repository::{
    AuthRepository, HttpAuthRepository, HttpInventoryRepository, HttpPickingRepository,
    HttpStockInRepository, HttpStockOutRepository, InventoryRepository, PickingRepository,
    StockInRepository, StockOutRepository,
};
use crate::store::{AuthStore, InventoryStore, PickingStore, StockInStore, StockOutStore};
use crate::usecase::{
    AuthUseCases, InventoryUseCases, PickingUseCases, StockInUseCases, StockOutUseCases,
};

/// One repository per feature, all backed by the same data source.
#[derive(Clone)]
pub struct Repositories {
    pub inventory: Arc<dyn InventoryRepository>,
    pub picking: Arc<dyn PickingRepository>,
    pub stock_in: Arc<dyn StockInRepository>,
    pub stock_out: Arc<dyn StockOutRepository>,
    pub auth: Arc<dyn AuthRepository>,
}

impl Repositories {
    pub fn http(client: Arc<HttpClient>) -> Self {
        Self {
            inventory: Arc::new(HttpInventoryRepository::new(client.clone())),
            picking: Arc::new(HttpPickingRepository::new(client.clone())),
            stock_in: Arc::new(HttpStockInRepository::new(client.clone())),
            stock_out: Arc::new(HttpStockOutRepository::new(client.clone())),
            auth: Arc::new(HttpAuthRepository::new(client)),
        }
    }

    /// Fixture-seeded in-memory backends.
    pub fn mock() -> Self {
        Self {
            inventory: Arc::new(MockInventoryRepository::default()),
            picking: Arc::new(MockPickingRepository::default()),
            stock_in: Arc::new(MockStockInRepository::default()),
            stock_out: Arc::new(MockStockOutRepository::default()),
            auth: Arc::new(MockAuthRepository::new()),
        }
    }
}

pub struct Container {
    pub config: ClientConfig,
    pub inventory: InventoryStore,
    pub picking: PickingStore,
    pub stock_in: StockInStore,
    pub stock_out: StockOutStore,
    pub auth: AuthStore,
}

impl Container {
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let repositories = match config.data_source {
            DataSource::Http => Repositories::http(Arc::new(HttpClient::new(&config)?)),
            DataSource::Mock => Repositories::mock(),
        };
        tracing::info!(
            data_source = %config.data_source,
            api_base_url = %config.api_base_url,
            page_size = config.page_size,
            "client container ready"
        );
        Ok(Self::with_repositories(config, repositories))
    }

    pub fn with_repositories(config: ClientConfig, repositories: Repositories) -> Self {
        let page_size = config.page_size;
        Self {
            inventory: InventoryStore::new(InventoryUseCases::new(repositories.inventory), page_size),
            picking: PickingStore::new(PickingUseCases::new(repositories.picking), page_size),
            stock_in: StockInStore::new(StockInUseCases::new(repositories.stock_in), page_size),
            stock_out: StockOutStore::new(StockOutUseCases::new(repositories.stock_out), page_size),
            auth: AuthStore::new(AuthUseCases::new(repositories.auth)),
            config,
        }
    }
}
