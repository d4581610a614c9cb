//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod execution;
pub mod generator;
pub mod historical;
pub mod indicator;
pub mod ledger;
pub mod performance;
pub mod portfolio;
pub mod price;
pub mod strategy;
