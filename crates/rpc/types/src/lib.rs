//! Types for the JSON-RPC envelope exchanged with a chain simulator.

pub mod envelope;
pub mod errors;
pub mod methods;

pub use envelope::*;
pub use errors::*;
