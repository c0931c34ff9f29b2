use super::{Map, Monthly};
use std::fmt::Display;

/// The named volume shapes a contract may reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum VolumeShapeKind {
    /// Even delivery across the year
    #[default]
    Flat,
    /// Delivery following solar generation
    Solar,
    /// Delivery following wind generation
    Wind,
    /// A user-defined profile
    Custom,
}

impl VolumeShapeKind {
    /// The lowercase tag of the shape
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Custom => "custom",
        }
    }
}

impl Display for VolumeShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The percentage of annual volume delivered in each calendar month, per named shape.
///
/// The reference shapes each sum to 100, but nothing enforces this. The table is
/// only ever replaced as a whole, as part of the settings.
pub type VolumeShapeTable = Map<VolumeShapeKind, Monthly>;
