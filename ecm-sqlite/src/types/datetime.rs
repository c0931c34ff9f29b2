//! Timestamps as stored by this backend.

use std::{borrow::Borrow, fmt::Display};
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision.
///
/// Contracts and settings are stamped with one of these whenever they are
/// written. The value is held without an offset, since it is always UTC, and
/// (de)serializes as RFC3339.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "Rfc3339Repr", into = "Rfc3339Repr")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl DateTime {
    /// The current time
    pub fn now() -> Self {
        time::OffsetDateTime::now_utc().into()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .0
            .assume_utc()
            .format(&Rfc3339)
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Rfc3339Repr(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<Rfc3339Repr> for DateTime {
    fn from(value: Rfc3339Repr) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for Rfc3339Repr {
    fn from(value: DateTime) -> Self {
        Self(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}
