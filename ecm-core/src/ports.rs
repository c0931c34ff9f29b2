mod application;
mod contract;
mod curve;
mod settings;

pub use application::Application;
pub use contract::ContractRepository;
pub use curve::PriceCurveRepository;
pub use settings::SettingsRepository;

use std::hash::Hash;

/// The types every store shares.
///
/// The individual repository traits extend this one, so that an adapter names
/// its error, timestamp and identifier types exactly once.
pub trait Repository {
    /// The error returned by every store operation
    type Error: std::error::Error + Send + Sync + 'static;

    /// The timestamp type used to stamp writes
    type DateTime: Clone + Send + Sync;

    /// The identifier assigned to contracts
    type ContractId: Clone + Eq + Hash + Send + Sync;
}
