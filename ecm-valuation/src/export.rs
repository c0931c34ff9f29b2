use crate::Valued;
use ecm_core::models::{Map, TimeSeriesRow};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::borrow::Cow;
use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

/// Write resampled series as CSV.
///
/// The header is `label` followed by every series, in the order the series
/// first appear across the rows. A series absent from a row leaves its cell
/// empty.
pub fn write_series_csv<K: Eq + Hash + Display>(
    rows: &[TimeSeriesRow<K>],
    buffer: &mut impl Write,
) -> Result<(), std::io::Error> {
    let columns = rows
        .iter()
        .flat_map(|row| row.values.keys())
        .collect::<IndexSet<_, FxBuildHasher>>();

    write!(buffer, "label")?;
    for column in columns.iter() {
        write!(buffer, ",{}", escape(&column.to_string()))?;
    }
    writeln!(buffer)?;

    for row in rows {
        write!(buffer, "{}", escape(&row.label))?;
        for column in columns.iter() {
            write_cell(buffer, &row.values, column)?;
        }
        writeln!(buffer)?;
    }

    Ok(())
}

/// Write valuation results as CSV, one line per contract.
///
/// Columns are the contract name, the twelve monthly values, then the summary
/// statistics.
pub fn write_mtm_csv<R: Valued>(
    records: &[R],
    buffer: &mut impl Write,
) -> Result<(), std::io::Error> {
    writeln!(
        buffer,
        "contract,jan,feb,mar,apr,may,jun,jul,aug,sep,oct,nov,dec,total,avg,max,min,volatility"
    )?;

    for record in records {
        write!(buffer, "{}", escape(record.name()))?;
        for value in record.monthly().iter() {
            write!(buffer, ",{value}")?;
        }
        let summary = record.summary();
        writeln!(
            buffer,
            ",{},{},{},{},{}",
            summary.total, summary.avg, summary.max, summary.min, summary.volatility
        )?;
    }

    Ok(())
}

fn write_cell<K: Eq + Hash>(
    buffer: &mut impl Write,
    values: &Map<K>,
    column: &K,
) -> Result<(), std::io::Error> {
    match values.get(column) {
        Some(value) => write!(buffer, ",{value}"),
        None => write!(buffer, ","),
    }
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
