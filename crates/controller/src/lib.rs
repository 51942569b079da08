//! Clock and funding control for tests running against a dev-chain simulator.
//!
//! [`Controller`] owns a [`Simulator`](simclock_simulator::Simulator) handle and a
//! [`ValueTransferClient`] bound to it. Tests use it to discover the simulator's accounts, fund
//! arbitrary addresses from the primary account, and move the chain's clock forward.

mod client;
mod config;
mod controller;
mod errors;
mod types;

#[cfg(feature = "test-utils")]
pub use client::MockValueTransferClient;
pub use client::{SimulatorTransferClient, ValueTransferClient};
pub use config::ReceiptPolling;
pub use controller::Controller;
pub use errors::{ControllerError, TransactionError};
pub use types::{BlockHeader, TransferReceipt, TransferRequest, ValueTransfer};
