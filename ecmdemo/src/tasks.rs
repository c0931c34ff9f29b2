//! One-shot tasks run from the command line instead of serving the API.

use ecm_core::{
    models::{PortfolioReport, PriceCurve, PriceCurveQuery, SortKey, SortOrder, ValuationConfig},
    ports::{ContractRepository as _, PriceCurveRepository as _, SettingsRepository as _},
};
use ecm_sqlite::Db;
use ecm_valuation::{Book, rank, write_mtm_csv};
use std::{fs::File, io::BufReader, io::Write, path::Path};
use tracing::{Level, event};

/// Append the JSON array of price points stored at `path`, returning how many were stored.
pub async fn import_points(db: &Db, path: &Path) -> anyhow::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let points = serde_json::from_reader(reader)?;
    let inserted = db.insert_price_points(points).await?;
    event!(Level::INFO, inserted, path = %path.display(), "price points imported");
    Ok(inserted)
}

/// Value every stored contract and write the results to `out` as CSV.
///
/// Contracts are valued against the curve selected by `query`, or against the
/// built-in curve if there is no query, the store has no complete curve for
/// it, or the store fails to provide one.
pub async fn value_contracts(
    db: &Db,
    config: ValuationConfig,
    query: Option<&PriceCurveQuery>,
    sort: Option<SortKey>,
    order: SortOrder,
    out: &mut impl Write,
) -> anyhow::Result<PortfolioReport> {
    let settings = db.get_settings().await?.unwrap_or_default();
    let contracts = db.list_contracts().await?;

    let curve = price_curve(db, query).await;

    let mut book = Book::new(contracts, settings.volume_shapes, curve, config);
    let mut reports = book.revalue()?.to_vec();
    if let Some(key) = sort {
        rank(&mut reports, key, order);
    }
    write_mtm_csv(&reports, out)?;

    let portfolio = book.portfolio()?;
    event!(
        Level::INFO,
        contracts = portfolio.contracts,
        total = portfolio.summary.total,
        "contracts valued"
    );
    Ok(portfolio)
}

/// The curve selected by `query`, or the built-in curve if there is none to be had.
async fn price_curve(db: &Db, query: Option<&PriceCurveQuery>) -> PriceCurve {
    let Some(query) = query else {
        return PriceCurve::fallback();
    };

    match db.get_price_curve(query).await {
        Ok(Some(curve)) => curve,
        Ok(None) => {
            event!(
                Level::WARN,
                curve_name = query.curve_name.as_str(),
                "no complete curve stored, valuing against the built-in curve"
            );
            PriceCurve::fallback()
        }
        Err(err) => {
            event!(
                Level::ERROR,
                err = err.to_string(),
                curve_name = query.curve_name.as_str(),
                "failed to get curve, valuing against the built-in curve"
            );
            PriceCurve::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::DemoApp;
    use ecm_core::{
        models::{ContractData, ContractStatus, ContractType, TimeSeriesPoint, VolumeShapeKind},
        ports::Application as _,
    };
    use ecm_sqlite::config::SqliteConfig;
    use std::sync::Arc;
    use time::{Date, Month};

    async fn app() -> DemoApp {
        DemoApp {
            db: Db::open(&SqliteConfig::default()).await.unwrap(),
            valuation: Arc::new(ValuationConfig::default()),
        }
    }

    fn contract(name: &str, strike_price: f64) -> ContractData {
        ContractData {
            name: name.to_owned(),
            kind: ContractType::Wholesale,
            category: "Swap".to_owned(),
            state: "NSW".to_owned(),
            counterparty: "Acme Energy".to_owned(),
            start_date: Date::from_calendar_date(2025, Month::January, 1).unwrap(),
            end_date: Date::from_calendar_date(2025, Month::December, 31).unwrap(),
            annual_volume: 1200.0,
            strike_price,
            unit: "MWh".to_owned(),
            volume_shape: VolumeShapeKind::Flat,
            status: ContractStatus::Active,
            indexation: "fixed".to_owned(),
            reference_date: None,
        }
    }

    // Every month of 2025 priced at 100 for NSW
    fn points() -> Vec<TimeSeriesPoint> {
        (1..=12u8)
            .map(|month| TimeSeriesPoint {
                date: Date::from_calendar_date(2025, Month::try_from(month).unwrap(), 15).unwrap(),
                price: 100.0,
                state: "NSW".to_owned(),
                value_type: "base".to_owned(),
                scenario: "central".to_owned(),
                financial_year: "FY25".to_owned(),
                curve_name: "forward".to_owned(),
            })
            .collect()
    }

    #[tokio::test]
    async fn import_then_value() {
        let app = app().await;
        for (name, strike) in [("Cheap", 60.0), ("Dear", 90.0)] {
            let data = contract(name, strike);
            let id = app.generate_contract_id(&data);
            app.db.create_contract(id, data, app.now()).await.unwrap();
        }

        let path = std::env::temp_dir().join(format!("ecmdemo-{}.json", uuid::Uuid::now_v7()));
        serde_json::to_writer(File::create(&path).unwrap(), &points()).unwrap();
        let inserted = import_points(&app.db, &path).await;
        std::fs::remove_file(&path).unwrap();
        assert_eq!(inserted.unwrap(), 12);

        let mut out = Vec::new();
        let portfolio = value_contracts(
            &app.db,
            ValuationConfig::default(),
            Some(&PriceCurveQuery::new("forward")),
            Some(SortKey::Name),
            SortOrder::Ascending,
            &mut out,
        )
        .await
        .unwrap();

        // flat delivers 8.33% of 1200 MWh a month, at (100 - 60) + (100 - 90) per MWh
        assert_eq!(portfolio.contracts, 2);
        assert!((portfolio.summary.total - 12.0 * 99.96 * 50.0).abs() < 1e-6);

        let csv = String::from_utf8(out).unwrap();
        let names: Vec<&str> = csv
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        assert_eq!(names, ["Cheap", "Dear"]);
    }

    #[tokio::test]
    async fn unknown_curve_values_against_builtin() {
        let app = app().await;
        let mut out = Vec::new();
        let portfolio = value_contracts(
            &app.db,
            ValuationConfig::default(),
            Some(&PriceCurveQuery::new("missing")),
            None,
            SortOrder::Descending,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(portfolio.contracts, 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn store_failure_values_against_builtin() {
        let app = app().await;
        app.db.insert_price_points(points()).await.unwrap();
        let query = PriceCurveQuery::new("forward");
        assert_ne!(price_curve(&app.db, Some(&query)).await, PriceCurve::fallback());

        app.db.reader.close().await;
        assert_eq!(price_curve(&app.db, Some(&query)).await, PriceCurve::fallback());
    }
}
