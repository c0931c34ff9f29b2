use crate::models::{ContractData, ContractRecord};

/// Repository interface for contract CRUD operations.
///
/// Contracts are the input to every valuation. The store assigns nothing but
/// storage: identifiers are generated by the [`Application`](super::Application)
/// before creation.
pub trait ContractRepository: super::Repository {
    /// List every stored contract, in creation order.
    fn list_contracts(
        &self,
    ) -> impl Future<Output = Result<Vec<ContractRecord<Self::ContractId>>, Self::Error>> + Send;

    /// Retrieve a single contract, returning Option::None if it does not exist.
    fn get_contract(
        &self,
        contract_id: Self::ContractId,
    ) -> impl Future<Output = Result<Option<ContractRecord<Self::ContractId>>, Self::Error>> + Send;

    /// Store a new contract under `contract_id`.
    fn create_contract(
        &self,
        contract_id: Self::ContractId,
        data: ContractData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<ContractRecord<Self::ContractId>, Self::Error>> + Send;

    /// Replace the data of an existing contract.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the updated contract if successful
    /// - Ok(None) if no such contract exists
    /// - Err otherwise
    fn update_contract(
        &self,
        contract_id: Self::ContractId,
        data: ContractData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<ContractRecord<Self::ContractId>>, Self::Error>> + Send;

    /// Remove a contract.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the contract was removed
    /// - Ok(false) if no such contract exists
    /// - Err otherwise
    fn delete_contract(
        &self,
        contract_id: Self::ContractId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
