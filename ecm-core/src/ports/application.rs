use super::{ContractRepository, PriceCurveRepository, Repository, SettingsRepository};
use crate::models::{ContractData, ValuationConfig};

/// The integration point of an application built on these ports.
///
/// An application chooses its store, decides how contract identifiers are
/// minted, what time it is, and in which context contracts are valued.
pub trait Application {
    /// The store backing contracts, price curves and settings
    type Repository: ContractRepository + PriceCurveRepository + SettingsRepository;

    /// Get a reference to the store
    fn database(&self) -> &Self::Repository;

    /// The timestamp to stamp writes with
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Mint an identifier for a contract about to be created
    fn generate_contract_id(
        &self,
        data: &ContractData,
    ) -> <Self::Repository as Repository>::ContractId;

    /// The context contracts are valued in
    fn valuation_config(&self) -> &ValuationConfig;
}
