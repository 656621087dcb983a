//! Billing statements for theatrical performances.
//!
//! [`billing`] holds the pricing engine, the statement aggregator and the
//! text/HTML/JSON renderers. [`loader`] reads catalogs and invoices from disk.

pub mod billing;
mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod telemetry;

use error::AppError;

/// Entry point for the `theater-billing` binary.
pub fn run() -> Result<(), AppError> {
    cli::run()
}
