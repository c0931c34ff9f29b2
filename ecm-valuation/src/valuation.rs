use ecm_core::models::{
    ContractData, ContractRecord, ContractType, LookupPolicy, MONTHS, Monthly, MtmReport,
    PriceCurve, Summary, ValuationConfig, VolumeShapeKind, VolumeShapeTable,
};
use tracing::{Level, event};

/// The reasons a contract cannot be valued.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    /// The contract's volume shape is not in the shape table
    #[error("no volume shape named {0}")]
    UnknownShape(VolumeShapeKind),

    /// The price curve has no prices for the contract's state
    #[error("no prices for state {0:?}")]
    UnknownState(String),

    /// Substitution was attempted, but the default shape is missing as well
    #[error("default volume shape {0} is missing from the shape table")]
    MissingDefaultShape(VolumeShapeKind),

    /// Substitution was attempted, but the default state is missing as well
    #[error("default state {0:?} is missing from the price curve")]
    MissingDefaultState(String),
}

/// The mark-to-market of one contract.
///
/// The record borrows the contract it was computed from, so that consumers can
/// get back to the full contract without a second lookup. Convert it into an
/// [`MtmReport`] to detach it.
#[derive(Debug, Clone, PartialEq)]
pub struct MtmRecord<'a, ContractId> {
    /// The contract that was valued
    pub contract: &'a ContractRecord<ContractId>,
    /// Mark-to-market per calendar month
    pub monthly: Monthly,
    /// Statistics over `monthly`
    pub summary: Summary,
}

impl<'a, ContractId> MtmRecord<'a, ContractId> {
    /// The id of the valued contract
    pub fn contract_id(&self) -> &'a ContractId {
        &self.contract.id
    }

    /// The name of the valued contract
    pub fn contract_name(&self) -> &'a str {
        &self.contract.data.name
    }
}

impl<ContractId: Clone> From<&MtmRecord<'_, ContractId>> for MtmReport<ContractId> {
    fn from(record: &MtmRecord<'_, ContractId>) -> Self {
        Self {
            contract_id: record.contract.id.clone(),
            contract_name: record.contract.data.name.clone(),
            monthly: record.monthly,
            summary: record.summary,
        }
    }
}

impl<ContractId: Clone> From<MtmRecord<'_, ContractId>> for MtmReport<ContractId> {
    fn from(record: MtmRecord<'_, ContractId>) -> Self {
        Self::from(&record)
    }
}

/// Values contracts against one set of market inputs.
///
/// A `Valuer` is cheap to construct and holds nothing but references, so a
/// fresh one can be made whenever any of its inputs changes.
#[derive(Debug, Clone, Copy)]
pub struct Valuer<'a> {
    shapes: &'a VolumeShapeTable,
    curve: &'a PriceCurve,
    config: &'a ValuationConfig,
}

impl<'a> Valuer<'a> {
    /// Bind the market inputs
    pub fn new(
        shapes: &'a VolumeShapeTable,
        curve: &'a PriceCurve,
        config: &'a ValuationConfig,
    ) -> Self {
        Self {
            shapes,
            curve,
            config,
        }
    }

    /// Resolve a volume shape, substituting the default shape if so configured.
    pub fn shape(&self, kind: VolumeShapeKind) -> Result<&'a Monthly, ValuationError> {
        let shapes: &'a VolumeShapeTable = self.shapes;
        if let Some(shape) = shapes.get(&kind) {
            return Ok(shape);
        }

        match self.config.lookup {
            LookupPolicy::Strict => Err(ValuationError::UnknownShape(kind)),
            LookupPolicy::Fallback => {
                let fallback = self.config.default_shape;
                event!(
                    Level::WARN,
                    shape = %kind,
                    fallback = %fallback,
                    "volume shape not found, substituting default"
                );
                shapes
                    .get(&fallback)
                    .ok_or(ValuationError::MissingDefaultShape(fallback))
            }
        }
    }

    /// Resolve the monthly prices of a state, substituting the default state if so configured.
    pub fn prices(&self, state: &str) -> Result<&'a Monthly, ValuationError> {
        let curve: &'a PriceCurve = self.curve;
        if let Some(prices) = curve.prices(state) {
            return Ok(prices);
        }

        match self.config.lookup {
            LookupPolicy::Strict => Err(ValuationError::UnknownState(state.to_owned())),
            LookupPolicy::Fallback => {
                let fallback = &self.config.default_state;
                event!(
                    Level::WARN,
                    state,
                    fallback = fallback.as_str(),
                    "no prices for state, substituting default"
                );
                curve
                    .prices(fallback)
                    .ok_or_else(|| ValuationError::MissingDefaultState(fallback.clone()))
            }
        }
    }

    /// Compute the monthly mark-to-market of a contract's data.
    pub fn value_data(&self, data: &ContractData) -> Result<Monthly, ValuationError> {
        let shape = self.shape(data.volume_shape)?;
        let prices = self.prices(&data.state)?;
        Ok(monthly_mtm(data, shape, prices))
    }

    /// Value a single contract.
    pub fn value<'c, ContractId>(
        &self,
        contract: &'c ContractRecord<ContractId>,
    ) -> Result<MtmRecord<'c, ContractId>, ValuationError> {
        let monthly = self.value_data(&contract.data)?;
        Ok(MtmRecord {
            contract,
            summary: summarize(&monthly),
            monthly,
        })
    }

    /// Value every contract, preserving their order.
    ///
    /// The first contract that cannot be valued aborts the whole batch.
    pub fn value_all<'c, ContractId: 'c>(
        &self,
        contracts: impl IntoIterator<Item = &'c ContractRecord<ContractId>>,
    ) -> Result<Vec<MtmRecord<'c, ContractId>>, ValuationError> {
        contracts
            .into_iter()
            .map(|contract| self.value(contract))
            .collect()
    }
}

/// Value a single contract against the given market inputs.
pub fn compute_mtm<'c, ContractId>(
    contract: &'c ContractRecord<ContractId>,
    shapes: &VolumeShapeTable,
    curve: &PriceCurve,
    config: &ValuationConfig,
) -> Result<MtmRecord<'c, ContractId>, ValuationError> {
    Valuer::new(shapes, curve, config).value(contract)
}

/// The monthly mark-to-market of a contract, given its resolved shape and prices.
///
/// Each month's volume is `annual_volume * shape[m] / 100`. Retail contracts
/// sell at the strike, so they gain when the market falls below it; every
/// other contract type gains when the market rises above it.
pub fn monthly_mtm(data: &ContractData, shape: &Monthly, prices: &Monthly) -> Monthly {
    Monthly::from_fn(|month| {
        let volume = data.annual_volume * shape[month] / 100.0;
        let strike_value = volume * data.strike_price;
        let market_value = volume * prices[month];
        match data.kind {
            ContractType::Retail => strike_value - market_value,
            ContractType::Wholesale | ContractType::Offtake => market_value - strike_value,
        }
    })
}

/// Summary statistics of a monthly series.
///
/// The volatility is the population standard deviation (divisor twelve).
pub fn summarize(monthly: &Monthly) -> Summary {
    let n = MONTHS as f64;
    let total = monthly.sum();
    let avg = total / n;
    let max = monthly.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = monthly.iter().copied().fold(f64::INFINITY, f64::min);
    let variance = monthly.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;

    Summary {
        total,
        avg,
        max,
        min,
        volatility: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summary_of_constant_series() {
        let summary = summarize(&Monthly::splat(-2.5));
        assert_relative_eq!(summary.total, -30.0);
        assert_relative_eq!(summary.avg, -2.5);
        assert_relative_eq!(summary.max, -2.5);
        assert_relative_eq!(summary.min, -2.5);
        assert_relative_eq!(summary.volatility, 0.0);
    }

    #[test]
    fn summary_uses_population_deviation() {
        // six months at 0 and six at 2: mean 1, every deviation is exactly 1
        let summary = summarize(&Monthly::from_fn(|m| if m % 2 == 0 { 0.0 } else { 2.0 }));
        assert_relative_eq!(summary.avg, 1.0);
        assert_relative_eq!(summary.volatility, 1.0);
        assert_relative_eq!(summary.max, 2.0);
        assert_relative_eq!(summary.min, 0.0);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ValuationError::UnknownShape(VolumeShapeKind::Wind).to_string(),
            "no volume shape named wind"
        );
        assert_eq!(
            ValuationError::UnknownState("WA".to_owned()).to_string(),
            "no prices for state \"WA\""
        );
    }
}
