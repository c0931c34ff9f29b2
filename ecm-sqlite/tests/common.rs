use ecm_core::{
    models::{
        ContractData, ContractStatus, ContractType, TimeSeriesPoint, ValuationConfig,
        VolumeShapeKind,
    },
    ports::Application,
};
use ecm_sqlite::{
    Db,
    config::SqliteConfig,
    types::{ContractId, DateTime},
};
use time::{Date, macros::date};

pub struct TestApp(pub Db, pub ValuationConfig);

impl TestApp {
    pub async fn open() -> anyhow::Result<Self> {
        let db = Db::open(&SqliteConfig::default()).await?;
        Ok(Self(db, ValuationConfig::default()))
    }
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        DateTime::now()
    }

    fn generate_contract_id(&self, _data: &ContractData) -> ContractId {
        uuid::Uuid::now_v7().into()
    }

    fn valuation_config(&self) -> &ValuationConfig {
        &self.1
    }
}

#[allow(dead_code)]
pub fn contract(name: &str) -> ContractData {
    ContractData {
        name: name.to_owned(),
        kind: ContractType::Wholesale,
        category: "Swap".to_owned(),
        state: "NSW".to_owned(),
        counterparty: "Acme Energy".to_owned(),
        start_date: date!(2025 - 01 - 01),
        end_date: date!(2025 - 12 - 31),
        annual_volume: 1200.0,
        strike_price: 80.0,
        unit: "MWh".to_owned(),
        volume_shape: VolumeShapeKind::Flat,
        status: ContractStatus::Active,
        indexation: "fixed".to_owned(),
        reference_date: None,
    }
}

#[allow(dead_code)]
pub fn point(date: Date, state: &str, price: f64) -> TimeSeriesPoint {
    TimeSeriesPoint {
        date,
        price,
        state: state.to_owned(),
        value_type: "base".to_owned(),
        scenario: "central".to_owned(),
        financial_year: "FY25".to_owned(),
        curve_name: "forward".to_owned(),
    }
}
