use ecm_core::{
    models::{ContractData, ValuationConfig},
    ports::Application,
};
use ecm_sqlite::{
    Db,
    config::SqliteConfig,
    types::{ContractId, DateTime},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TestApp {
    db: Db,
    config: Arc<ValuationConfig>,
}

impl TestApp {
    pub async fn open(config: ValuationConfig) -> anyhow::Result<Self> {
        Ok(Self {
            db: Db::open(&SqliteConfig::default()).await?,
            config: Arc::new(config),
        })
    }
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        DateTime::now()
    }

    fn generate_contract_id(&self, _data: &ContractData) -> ContractId {
        uuid::Uuid::now_v7().into()
    }

    fn valuation_config(&self) -> &ValuationConfig {
        &self.config
    }
}
