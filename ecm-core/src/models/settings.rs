use super::{ContractType, Map, Monthly, VolumeShapeKind, VolumeShapeTable};

/// The user-editable configuration of the system.
///
/// Settings are read once and replaced wholesale whenever the user edits them;
/// there are no partial updates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Monthly percentage profiles by shape
    pub volume_shapes: VolumeShapeTable,
    /// The categories available for each contract type
    pub contract_types: Map<ContractType, Vec<String>>,
    /// The market regions contracts may reference
    pub states: Vec<String>,
    /// The escalation rules contracts may reference
    pub indexation_types: Vec<String>,
    /// The units contracts may be denominated in
    pub unit_types: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

impl Default for Settings {
    /// The reference configuration
    fn default() -> Self {
        let volume_shapes = [
            (VolumeShapeKind::Flat, Monthly::splat(8.33)),
            (
                VolumeShapeKind::Solar,
                Monthly::new([
                    11.2, 10.1, 9.0, 7.4, 5.9, 4.9, 5.3, 6.6, 8.0, 9.6, 10.6, 11.4,
                ]),
            ),
            (
                VolumeShapeKind::Wind,
                Monthly::new([7.2, 6.8, 7.5, 8.1, 9.0, 9.6, 9.9, 9.7, 9.1, 8.3, 7.6, 7.2]),
            ),
            (
                VolumeShapeKind::Custom,
                Monthly::new([8.5, 8.5, 8.3, 8.0, 8.2, 8.6, 8.9, 8.7, 8.1, 7.9, 8.1, 8.2]),
            ),
        ]
        .into_iter()
        .collect();

        let contract_types = [
            (
                ContractType::Retail,
                strings(&["C&I", "Mass Market", "Government"]),
            ),
            (
                ContractType::Wholesale,
                strings(&["Swap", "Cap", "Collar", "Futures"]),
            ),
            (
                ContractType::Offtake,
                strings(&["Solar PPA", "Wind PPA", "Hybrid PPA"]),
            ),
        ]
        .into_iter()
        .collect();

        Self {
            volume_shapes,
            contract_types,
            states: strings(&["NSW", "VIC", "QLD", "SA", "TAS"]),
            indexation_types: strings(&["fixed", "cpi", "escalation"]),
            unit_types: strings(&["MWh", "GWh", "LGC", "STC"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shapes_are_percentages() {
        let settings = Settings::default();
        for (kind, shape) in settings.volume_shapes.iter() {
            // the flat shape rounds each month to 8.33
            let tolerance = if *kind == VolumeShapeKind::Flat { 0.05 } else { 1e-9 };
            assert!((shape.sum() - 100.0).abs() < tolerance, "{kind}");
        }
    }

    #[test]
    fn test_roundtrip_json() {
        let settings = Settings::default();
        let raw = serde_json::to_string(&settings).unwrap();
        assert!(raw.contains(r#""wholesale":["Swap""#));
        let back: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, settings);
    }
}
