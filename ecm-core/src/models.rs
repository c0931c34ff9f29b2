mod config;
mod contract;
mod curve;
mod map;
mod monthly;
mod report;
mod series;
mod settings;
mod shape;

pub use config::{LookupPolicy, ValuationConfig};
pub use contract::{ContractData, ContractError, ContractRecord, ContractStatus, ContractType};
pub use curve::{CurveMetadata, PriceCurve, PriceCurveQuery};
pub use map::Map;
pub use monthly::{MONTHS, Monthly, MonthlyError};
pub use report::{MtmReport, PortfolioReport, SortKey, SortOrder, Summary};
pub use series::{Interval, SeriesView, TimeSeriesPoint, TimeSeriesRow};
pub use settings::Settings;
pub use shape::{VolumeShapeKind, VolumeShapeTable};

// `schemars` has no support for the `time` crate, so date fields describe themselves.
#[cfg(feature = "schemars")]
pub(crate) fn date_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date",
    })
}

#[cfg(feature = "schemars")]
pub(crate) fn optional_date_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": ["string", "null"],
        "format": "date",
    })
}
