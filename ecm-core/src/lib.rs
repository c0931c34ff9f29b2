#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the ecm-core crate.
//! [ecm_core]: https://docs.rs/ecm_core/latest/ecm_core/index.html
//! [ecm_valuation]: https://docs.rs/ecm_valuation/latest/ecm_valuation/index.html
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for energy contract valuation.
///
/// This module contains the fundamental data structures that represent the domain entities:
/// contracts, volume shapes, price curves, time-series points and the reports derived from them.
///
/// The models in this module are primarily data structures with minimal business logic,
/// following the principles of the hexagonal architecture to separate domain entities
/// from their persistence and processing implementations.
pub mod models;

/// Interface traits for the contract management system.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (the contract store, the price-curve store and the settings store) without specifying
/// implementation details.
pub mod ports;
