use super::{Settings, VolumeShapeKind};
use std::fmt::Display;
use time::Date;

/// Which side of the market a contract sits on.
///
/// The side decides the sign of a contract's mark-to-market: a retailer profits
/// when the strike exceeds the market, everybody else when the market exceeds
/// the strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ContractType {
    /// Sale of energy to end customers
    Retail,
    /// A wholesale hedge (swap, cap, ...)
    Wholesale,
    /// Purchase of a generator's output
    Offtake,
}

impl ContractType {
    /// The lowercase tag of the contract type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Wholesale => "wholesale",
            Self::Offtake => "offtake",
        }
    }
}

impl Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle status of a contract
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ContractStatus {
    /// The contract is in force
    #[default]
    Active,
    /// The contract is awaiting execution
    Pending,
}

/// An energy contract as entered by a user, before it has been assigned an identifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractData {
    /// A human-readable name
    pub name: String,
    /// The side of the market the contract sits on
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ContractType,
    /// A category within the contract type (see [`Settings::contract_types`])
    pub category: String,
    /// The market region whose price curve values the contract
    pub state: String,
    /// The other party to the contract
    pub counterparty: String,
    /// First day of delivery
    #[cfg_attr(feature = "schemars", schemars(schema_with = "super::date_schema"))]
    pub start_date: Date,
    /// Last day of delivery
    #[cfg_attr(feature = "schemars", schemars(schema_with = "super::date_schema"))]
    pub end_date: Date,
    /// Contracted volume per year, in `unit`
    pub annual_volume: f64,
    /// The fixed price per unit
    pub strike_price: f64,
    /// The physical or financial unit of the volume
    pub unit: String,
    /// How the annual volume is spread over the months
    pub volume_shape: VolumeShapeKind,
    /// Lifecycle status
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: ContractStatus,
    /// The escalation rule applied to the strike price
    pub indexation: String,
    /// The date the strike price was struck
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "super::optional_date_schema")
    )]
    pub reference_date: Option<Date>,
}

impl ContractData {
    /// Check a contract against its own invariants and the configured enumerations.
    ///
    /// This is the gate applied when a contract is entered or edited. Valuation
    /// itself never calls it, so contracts that predate a settings change still value.
    pub fn validate(&self, settings: &Settings) -> Result<(), ContractError> {
        if !self.annual_volume.is_finite() || self.annual_volume < 0.0 {
            return Err(ContractError::AnnualVolume(self.annual_volume));
        }
        if !self.strike_price.is_finite() {
            return Err(ContractError::StrikePrice(self.strike_price));
        }
        if self.end_date < self.start_date {
            return Err(ContractError::DateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !settings.states.contains(&self.state) {
            return Err(ContractError::UnknownState(self.state.clone()));
        }
        if !settings.unit_types.contains(&self.unit) {
            return Err(ContractError::UnknownUnit(self.unit.clone()));
        }
        if !settings.indexation_types.contains(&self.indexation) {
            return Err(ContractError::UnknownIndexation(self.indexation.clone()));
        }
        let known_category = settings
            .contract_types
            .get(&self.kind)
            .is_some_and(|categories| categories.contains(&self.category));
        if !known_category {
            return Err(ContractError::UnknownCategory {
                kind: self.kind,
                category: self.category.clone(),
            });
        }
        if !settings.volume_shapes.contains_key(&self.volume_shape) {
            return Err(ContractError::UnknownShape(self.volume_shape));
        }
        Ok(())
    }
}

/// A contract together with the identifier the contract store assigned to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractRecord<ContractId> {
    /// Unique identifier of the contract
    pub id: ContractId,
    /// The contract itself
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ContractData,
}

/// The reasons a contract is rejected at data entry
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ContractError {
    /// Annual volume must be finite and non-negative
    #[error("annual volume must be finite and non-negative, got {0}")]
    AnnualVolume(f64),
    /// Strike price must be finite
    #[error("strike price must be finite, got {0}")]
    StrikePrice(f64),
    /// Delivery must not end before it starts
    #[error("contract ends ({end}) before it starts ({start})")]
    DateRange {
        /// First day of delivery
        start: Date,
        /// Last day of delivery
        end: Date,
    },
    /// The state is not one of the configured states
    #[error("unknown state {0:?}")]
    UnknownState(String),
    /// The unit is not one of the configured unit types
    #[error("unknown unit {0:?}")]
    UnknownUnit(String),
    /// The indexation is not one of the configured indexation types
    #[error("unknown indexation {0:?}")]
    UnknownIndexation(String),
    /// The category is not configured for the contract type
    #[error("unknown category {category:?} for {kind} contracts")]
    UnknownCategory {
        /// The contract type
        kind: ContractType,
        /// The rejected category
        category: String,
    },
    /// The volume shape is missing from the shape table
    #[error("no volume shape named {0}")]
    UnknownShape(VolumeShapeKind),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn contract() -> ContractData {
        ContractData {
            name: "Hedge 1".to_owned(),
            kind: ContractType::Wholesale,
            category: "Swap".to_owned(),
            state: "NSW".to_owned(),
            counterparty: "Origin".to_owned(),
            start_date: date!(2025 - 01 - 01),
            end_date: date!(2025 - 12 - 31),
            annual_volume: 1200.0,
            strike_price: 80.0,
            unit: "MWh".to_owned(),
            volume_shape: VolumeShapeKind::Flat,
            status: ContractStatus::Active,
            indexation: "fixed".to_owned(),
            reference_date: None,
        }
    }

    #[test]
    fn test_valid_contract() {
        assert_eq!(contract().validate(&Settings::default()), Ok(()));
    }

    #[test]
    fn test_negative_volume() {
        let mut contract = contract();
        contract.annual_volume = -1.0;
        assert_eq!(
            contract.validate(&Settings::default()),
            Err(ContractError::AnnualVolume(-1.0))
        );
    }

    #[test]
    fn test_reversed_dates() {
        let mut contract = contract();
        contract.end_date = date!(2024 - 12 - 31);
        assert!(matches!(
            contract.validate(&Settings::default()),
            Err(ContractError::DateRange { .. })
        ));
    }

    #[test]
    fn test_unknown_state() {
        let mut contract = contract();
        contract.state = "NWS".to_owned();
        assert_eq!(
            contract.validate(&Settings::default()),
            Err(ContractError::UnknownState("NWS".to_owned()))
        );
    }

    #[test]
    fn test_category_belongs_to_type() {
        let mut contract = contract();
        contract.category = "Solar PPA".to_owned();
        assert!(matches!(
            contract.validate(&Settings::default()),
            Err(ContractError::UnknownCategory { .. })
        ));
        contract.kind = ContractType::Offtake;
        assert_eq!(contract.validate(&Settings::default()), Ok(()));
    }

    #[test]
    fn test_serde_shape() {
        let value = serde_json::to_value(contract()).unwrap();
        assert_eq!(value["type"], "wholesale");
        assert_eq!(value["volume_shape"], "flat");
        assert_eq!(value["start_date"], "2025-01-01");
        assert!(value.get("reference_date").is_none());

        let back: ContractData = serde_json::from_value(value).unwrap();
        assert_eq!(back, contract());
    }

    #[test]
    fn test_record_flattens() {
        let record = ContractRecord {
            id: 7u32,
            data: contract(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Hedge 1");
    }
}
