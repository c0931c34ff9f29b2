use crate::{ValuationError, Valuer, portfolio};
use ecm_core::models::{
    ContractRecord, MtmReport, PortfolioReport, PriceCurve, ValuationConfig, VolumeShapeTable,
};
use tracing::{Level, event};

/// A book of contracts together with the market inputs they are valued against.
///
/// The book keeps the results of its last valuation and only recomputes them
/// after one of its inputs (contracts, price curve, volume shapes or
/// configuration) has been replaced. Asking for the valuation twice in a row
/// does the work once.
#[derive(Debug, Clone)]
pub struct Book<ContractId> {
    contracts: Vec<ContractRecord<ContractId>>,
    volume_shapes: VolumeShapeTable,
    price_curve: PriceCurve,
    config: ValuationConfig,
    valuation: Option<Vec<MtmReport<ContractId>>>,
    revaluations: usize,
}

impl<ContractId: Clone + PartialEq> Book<ContractId> {
    /// Create a book. Nothing is valued until [`Book::revalue`] is called.
    pub fn new(
        contracts: Vec<ContractRecord<ContractId>>,
        volume_shapes: VolumeShapeTable,
        price_curve: PriceCurve,
        config: ValuationConfig,
    ) -> Self {
        Self {
            contracts,
            volume_shapes,
            price_curve,
            config,
            valuation: None,
            revaluations: 0,
        }
    }

    /// The contracts in the book
    pub fn contracts(&self) -> &[ContractRecord<ContractId>] {
        &self.contracts
    }

    /// The price curve the book is valued against
    pub fn price_curve(&self) -> &PriceCurve {
        &self.price_curve
    }

    /// Replace every contract in the book.
    pub fn set_contracts(&mut self, contracts: Vec<ContractRecord<ContractId>>) {
        self.contracts = contracts;
        self.invalidate();
    }

    /// Insert a contract, replacing the one with the same id if present.
    pub fn upsert_contract(&mut self, record: ContractRecord<ContractId>) {
        match self.contracts.iter_mut().find(|c| c.id == record.id) {
            Some(existing) => *existing = record,
            None => self.contracts.push(record),
        }
        self.invalidate();
    }

    /// Remove a contract, returning it if it was in the book.
    pub fn remove_contract(&mut self, contract_id: &ContractId) -> Option<ContractRecord<ContractId>> {
        let index = self.contracts.iter().position(|c| &c.id == contract_id)?;
        self.invalidate();
        Some(self.contracts.remove(index))
    }

    /// Swap in a new price curve snapshot.
    pub fn set_price_curve(&mut self, price_curve: PriceCurve) {
        self.price_curve = price_curve;
        self.invalidate();
    }

    /// Swap in a new volume shape table.
    pub fn set_volume_shapes(&mut self, volume_shapes: VolumeShapeTable) {
        self.volume_shapes = volume_shapes;
        self.invalidate();
    }

    /// Change the valuation context.
    pub fn set_config(&mut self, config: ValuationConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Whether the cached valuation reflects the current inputs
    pub fn is_current(&self) -> bool {
        self.valuation.is_some()
    }

    /// How many times the book has actually been valued
    pub fn revaluations(&self) -> usize {
        self.revaluations
    }

    /// The valuation of every contract, in book order.
    ///
    /// Results are recomputed only if an input changed since the last call.
    /// On error the cache stays empty, so the next call tries again.
    pub fn revalue(&mut self) -> Result<&[MtmReport<ContractId>], ValuationError> {
        if self.valuation.is_none() {
            let reports: Vec<MtmReport<ContractId>> = {
                let valuer = Valuer::new(&self.volume_shapes, &self.price_curve, &self.config);
                valuer
                    .value_all(&self.contracts)?
                    .iter()
                    .map(MtmReport::from)
                    .collect()
            };
            self.revaluations += 1;
            event!(
                Level::DEBUG,
                contracts = reports.len(),
                revaluations = self.revaluations,
                "book revalued"
            );
            self.valuation = Some(reports);
        }

        Ok(self.valuation.as_deref().unwrap_or(&[]))
    }

    /// The portfolio view of the current valuation.
    pub fn portfolio(&mut self) -> Result<PortfolioReport, ValuationError> {
        Ok(portfolio(self.revalue()?))
    }

    fn invalidate(&mut self) {
        self.valuation = None;
    }
}
