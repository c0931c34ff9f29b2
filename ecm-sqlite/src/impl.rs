//! Repository trait implementations for the SQLite database.

use crate::{
    Db,
    types::{ContractId, DateTime},
};
use ecm_core::ports::Repository;

mod contract;
mod curve;
mod settings;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type ContractId = ContractId;
}
