//! The concrete application wiring the SQLite store into the API.

use ecm_core::{
    models::{ContractData, ValuationConfig},
    ports::Application,
};
use ecm_sqlite::{
    Db,
    types::{ContractId, DateTime},
};
use std::sync::Arc;
use uuid::Uuid;

/// Main application implementation combining the store and the valuation context.
#[derive(Clone)]
pub struct DemoApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// The context contracts are valued in
    pub valuation: Arc<ValuationConfig>,
}

impl Application for DemoApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        DateTime::now()
    }

    // Time-ordered ids keep the primary key index append-mostly.
    fn generate_contract_id(&self, _data: &ContractData) -> ContractId {
        Uuid::now_v7().into()
    }

    fn valuation_config(&self) -> &ValuationConfig {
        &self.valuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecm_core::models::{ContractStatus, ContractType, VolumeShapeKind};
    use ecm_sqlite::config::SqliteConfig;
    use time::macros::date;

    async fn create_test_app() -> DemoApp {
        DemoApp {
            db: Db::open(&SqliteConfig::default()).await.unwrap(),
            valuation: Arc::new(ValuationConfig::strict()),
        }
    }

    fn data() -> ContractData {
        ContractData {
            name: "Solar PPA".to_owned(),
            kind: ContractType::Wholesale,
            category: "PPA".to_owned(),
            state: "NSW".to_owned(),
            counterparty: "Acme Energy".to_owned(),
            start_date: date!(2025 - 07 - 01),
            end_date: date!(2026 - 06 - 30),
            annual_volume: 1000.0,
            strike_price: 75.0,
            unit: "MWh".to_owned(),
            volume_shape: VolumeShapeKind::Solar,
            status: ContractStatus::Active,
            indexation: "fixed".to_owned(),
            reference_date: None,
        }
    }

    #[tokio::test]
    async fn contract_ids_are_time_ordered_v7() {
        let app = create_test_app().await;
        let first = app.generate_contract_id(&data());
        let second = app.generate_contract_id(&data());

        assert_eq!(first.0.get_version_num(), 7);
        assert!(first < second);
    }

    #[tokio::test]
    async fn exposes_the_configured_context() {
        let app = create_test_app().await;
        assert_eq!(app.valuation_config(), &ValuationConfig::strict());
    }
}
