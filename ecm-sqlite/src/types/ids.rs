//! The identifier this backend assigns to contracts.

/// Unique identifier of a stored contract.
///
/// Serializes as a plain uuid and is stored in SQLite as its hyphenated text
/// form, so that rows can be inspected with ordinary tooling.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ContractId(pub uuid::Uuid);

impl From<uuid::Uuid> for ContractId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value)
    }
}

impl From<ContractId> for uuid::Uuid {
    fn from(value: ContractId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ContractId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl sqlx::Type<sqlx::Sqlite> for ContractId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ContractId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        sqlx::Encode::<'q, sqlx::Sqlite>::encode(self.0.hyphenated().to_string(), args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ContractId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let text = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(text.parse()?)
    }
}
