use super::VolumeShapeKind;

/// What the valuation does when a contract names a state or a volume shape it
/// has no data for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LookupPolicy {
    /// Substitute the configured default and carry on
    #[default]
    Fallback,
    /// Refuse to value the contract
    Strict,
}

/// The context valuations take place in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationConfig {
    /// How missing lookups are resolved
    #[cfg_attr(feature = "serde", serde(default))]
    pub lookup: LookupPolicy,

    /// The state whose curve stands in for an unknown state
    #[cfg_attr(feature = "serde", serde(default = "default_state"))]
    pub default_state: String,

    /// The shape that stands in for an unknown shape
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_shape: VolumeShapeKind,
}

fn default_state() -> String {
    "NSW".to_owned()
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            lookup: LookupPolicy::default(),
            default_state: default_state(),
            default_shape: VolumeShapeKind::default(),
        }
    }
}

impl ValuationConfig {
    /// The default context, refusing unknown lookups instead of substituting
    pub fn strict() -> Self {
        Self {
            lookup: LookupPolicy::Strict,
            ..Default::default()
        }
    }
}
