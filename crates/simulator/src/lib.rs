//! Handles to a dev-chain simulator reachable over JSON-RPC.
//!
//! The [`Simulator`] trait is the single seam: it accepts one request envelope and resolves to
//! the envelope the node returned. [`AnvilSimulator`] is the process-backed implementation; tests
//! substitute an in-memory chain or a mock.

mod anvil;
mod config;
mod errors;
mod traits;

pub use anvil::AnvilSimulator;
pub use config::{SimulatorConfig, DEFAULT_ACCOUNT_COUNT, DEFAULT_BALANCE_ETHER, WEI_PER_ETHER};
pub use errors::SimulatorError;
#[cfg(feature = "test-utils")]
pub use traits::MockSimulator;
pub use traits::Simulator;
