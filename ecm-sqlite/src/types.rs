//! Types shared between the SQLite implementation and its callers.
//!
//! The public types are the identifier and timestamp representations chosen
//! by this backend. The crate-private row types map query results onto the
//! models of `ecm-core`.

use ecm_core::models::{ContractData, ContractRecord, TimeSeriesPoint};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::ContractId;

#[derive(sqlx::FromRow)]
pub(crate) struct ContractRow {
    pub id: ContractId,
    pub data: sqlx::types::Json<ContractData>,
}

impl From<ContractRow> for ContractRecord<ContractId> {
    fn from(row: ContractRow) -> Self {
        Self {
            id: row.id,
            data: row.data.0,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PricePointRow {
    pub date: time::Date,
    pub price: f64,
    pub state: String,
    pub value_type: String,
    pub scenario: String,
    pub financial_year: String,
    pub curve_name: String,
}

impl From<PricePointRow> for TimeSeriesPoint {
    fn from(row: PricePointRow) -> Self {
        Self {
            date: row.date,
            price: row.price,
            state: row.state,
            value_type: row.value_type,
            scenario: row.scenario,
            financial_year: row.financial_year,
            curve_name: row.curve_name,
        }
    }
}

/// The average price of one state over one calendar month (1 = January).
#[derive(sqlx::FromRow)]
pub(crate) struct MonthlyPriceRow {
    pub state: String,
    pub month: i64,
    pub price: f64,
}
