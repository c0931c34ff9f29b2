use super::Monthly;

/// Summary statistics of a monthly mark-to-market series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// The sum of the monthly values
    pub total: f64,
    /// The total divided by twelve
    pub avg: f64,
    /// The largest monthly value
    pub max: f64,
    /// The smallest monthly value
    pub min: f64,
    /// The population standard deviation of the monthly values
    pub volatility: f64,
}

/// The mark-to-market of a single contract, detached from the contract itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MtmReport<ContractId> {
    /// The contract that was valued
    pub contract_id: ContractId,
    /// The name of the contract that was valued
    pub contract_name: String,
    /// Mark-to-market per calendar month
    pub monthly: Monthly,
    /// Statistics over `monthly`
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: Summary,
}

/// The mark-to-market of a set of contracts taken together.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioReport {
    /// The number of contracts aggregated
    pub contracts: usize,
    /// Month-by-month sum of the contracts' mark-to-market
    pub monthly: Monthly,
    /// Statistics over `monthly`
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: Summary,
}

/// The field valuation results are ranked by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortKey {
    /// The contract name, compared case-insensitively
    Name,
    /// The annual total
    #[default]
    Total,
    /// The monthly average
    #[cfg_attr(feature = "serde", serde(alias = "avg"))]
    Average,
    /// The standard deviation of the monthly values
    Volatility,
}

/// The direction of a ranking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortOrder {
    /// Smallest first
    #[cfg_attr(feature = "serde", serde(alias = "asc"))]
    Ascending,
    /// Largest first
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "desc"))]
    Descending,
}
