use crate::models::{CurveMetadata, PriceCurve, PriceCurveQuery, TimeSeriesPoint};

/// Repository interface for market price data.
///
/// The store holds raw dated price points. It serves them either as they are,
/// for charting, or condensed into a monthly [`PriceCurve`] snapshot, for valuation.
pub trait PriceCurveRepository: super::Repository {
    /// Build the monthly price curve selected by `query`.
    ///
    /// Each state's monthly price is the average of its points falling in that
    /// calendar month. A state only appears in the curve when every month has data.
    ///
    /// # Returns
    ///
    /// - Ok(Some(curve)) if at least one state has a complete curve
    /// - Ok(None) otherwise
    fn get_price_curve(
        &self,
        query: &PriceCurveQuery,
    ) -> impl Future<Output = Result<Option<PriceCurve>, Self::Error>> + Send;

    /// Retrieve the raw points selected by `query`, ordered by date.
    fn query_price_points(
        &self,
        query: &PriceCurveQuery,
    ) -> impl Future<Output = Result<Vec<TimeSeriesPoint>, Self::Error>> + Send;

    /// Describe the dimensions available for a curve, returning Option::None if the curve has no data.
    fn get_curve_metadata(
        &self,
        curve_name: &str,
    ) -> impl Future<Output = Result<Option<CurveMetadata>, Self::Error>> + Send;

    /// Append price points to the store, returning the number stored.
    fn insert_price_points(
        &self,
        points: Vec<TimeSeriesPoint>,
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;
}
