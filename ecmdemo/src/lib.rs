#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod impls;

mod cli;
pub use cli::{Cli, Commands};

mod config;
pub use config::AppConfig;

mod tasks;
pub use tasks::{import_points, value_contracts};
