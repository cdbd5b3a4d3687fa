//! SaleScope server
//!
//! Wires configuration, logging, the SeaORM store and the REST router into a
//! runnable process, and exposes the CSV seeding command.

pub mod cli;
pub mod seed;
pub mod startup;

// Re-export main components
pub use cli::{Cli, Commands};
pub use seed::run_seed;
pub use startup::Server;
