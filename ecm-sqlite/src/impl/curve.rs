use crate::{
    Db,
    types::{MonthlyPriceRow, PricePointRow},
};
use ecm_core::{
    models::{CurveMetadata, MONTHS, Map, Monthly, PriceCurve, PriceCurveQuery, TimeSeriesPoint},
    ports::PriceCurveRepository,
};
use tokio::try_join;
use tracing::{Level, event};

// 7 bound parameters per row keeps each statement well below SQLite's variable limit
const INSERT_CHUNK: usize = 1000;

impl PriceCurveRepository for Db {
    async fn get_price_curve(
        &self,
        query: &PriceCurveQuery,
    ) -> Result<Option<PriceCurve>, Self::Error> {
        let rows = sqlx::query_as::<_, MonthlyPriceRow>(
            r#"
            select
                state,
                cast(strftime('%m', date) as integer) as month,
                avg(price) as price
            from
                price_point
            where
                curve_name = $1
            and
                ($2 is null or financial_year = $2)
            and
                ($3 is null or scenario = $3)
            and
                ($4 is null or value_type = $4)
            group by
                state, month
            order by
                min(id), month
            "#,
        )
        .bind(&query.curve_name)
        .bind(query.financial_year.as_deref())
        .bind(query.scenario.as_deref())
        .bind(query.value_type.as_deref())
        .fetch_all(&self.reader)
        .await?;

        let mut months: Map<String, [Option<f64>; MONTHS]> = Map::default();
        for row in rows {
            let slot = usize::try_from(row.month - 1)
                .ok()
                .filter(|index| *index < MONTHS);
            if let Some(index) = slot {
                months.entry(row.state).or_default()[index] = Some(row.price);
            }
        }

        let curve: PriceCurve = months
            .into_iter()
            .filter_map(|(state, prices)| {
                let complete = prices.iter().all(Option::is_some);
                if !complete {
                    event!(
                        Level::WARN,
                        curve = query.curve_name.as_str(),
                        state = state.as_str(),
                        "incomplete monthly prices, state left out of curve"
                    );
                    return None;
                }
                Some((state, Monthly::from_fn(|m| prices[m].unwrap_or_default())))
            })
            .collect();

        Ok((!curve.is_empty()).then_some(curve))
    }

    async fn query_price_points(
        &self,
        query: &PriceCurveQuery,
    ) -> Result<Vec<TimeSeriesPoint>, Self::Error> {
        let rows = sqlx::query_as::<_, PricePointRow>(
            r#"
            select
                date,
                price,
                state,
                value_type,
                scenario,
                financial_year,
                curve_name
            from
                price_point
            where
                curve_name = $1
            and
                ($2 is null or financial_year = $2)
            and
                ($3 is null or scenario = $3)
            and
                ($4 is null or value_type = $4)
            order by
                date, id
            "#,
        )
        .bind(&query.curve_name)
        .bind(query.financial_year.as_deref())
        .bind(query.scenario.as_deref())
        .bind(query.value_type.as_deref())
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_curve_metadata(
        &self,
        curve_name: &str,
    ) -> Result<Option<CurveMetadata>, Self::Error> {
        let distinct = |column: &'static str| {
            let sql = format!(
                "select distinct {column} from price_point where curve_name = $1 order by {column}"
            );
            let reader = self.reader.clone();
            let curve_name = curve_name.to_owned();
            async move {
                sqlx::query_scalar::<_, String>(&sql)
                    .bind(curve_name)
                    .fetch_all(&reader)
                    .await
            }
        };

        let (financial_years, scenarios, value_types, states) = try_join!(
            distinct("financial_year"),
            distinct("scenario"),
            distinct("value_type"),
            distinct("state"),
        )?;

        if states.is_empty() {
            return Ok(None);
        }

        Ok(Some(CurveMetadata {
            financial_years,
            scenarios,
            value_types,
            states,
        }))
    }

    async fn insert_price_points(&self, points: Vec<TimeSeriesPoint>) -> Result<usize, Self::Error> {
        if points.is_empty() {
            return Ok(0);
        }

        let mut tx = self.writer.begin().await?;
        let mut inserted = 0;
        for chunk in points.chunks(INSERT_CHUNK) {
            let mut query_builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
                "insert into price_point (curve_name, financial_year, scenario, value_type, state, date, price) ",
            );
            query_builder.push_values(chunk, |mut b, point| {
                b.push_bind(point.curve_name.as_str())
                    .push_bind(point.financial_year.as_str())
                    .push_bind(point.scenario.as_str())
                    .push_bind(point.value_type.as_str())
                    .push_bind(point.state.as_str())
                    .push_bind(point.date)
                    .push_bind(point.price);
            });
            let result = query_builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected() as usize;
        }
        tx.commit().await?;

        Ok(inserted)
    }
}
