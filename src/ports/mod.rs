//! Port traits: the boundaries between the simulation core and the outside world.

pub mod config_port;
pub mod execution_port;
pub mod ledger_port;
pub mod price_data_port;
