use crate::{Valued, summarize};
use ecm_core::models::{Monthly, PortfolioReport};

/// Aggregate a set of valuation results into a single portfolio view.
///
/// The portfolio's monthly series is the month-by-month sum of its members,
/// and its statistics are computed over that sum. An empty set yields an
/// all-zero portfolio.
pub fn portfolio<'r, R: Valued + 'r>(records: impl IntoIterator<Item = &'r R>) -> PortfolioReport {
    let mut contracts = 0;
    let mut monthly = Monthly::default();
    for record in records {
        contracts += 1;
        monthly += *record.monthly();
    }

    PortfolioReport {
        contracts,
        summary: summarize(&monthly),
        monthly,
    }
}
