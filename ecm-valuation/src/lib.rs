#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod aggregate;
mod book;
mod export;
mod portfolio;
mod ranking;
mod valuation;

pub use aggregate::{Bucket, Buckets, aggregate, aggregate_series, buckets};
pub use book::Book;
pub use export::{write_mtm_csv, write_series_csv};
pub use portfolio::portfolio;
pub use ranking::{Valued, rank};
pub use valuation::{MtmRecord, ValuationError, Valuer, compute_mtm, monthly_mtm, summarize};
