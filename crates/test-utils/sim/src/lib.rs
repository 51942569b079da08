//! Testing utilities for code that drives a dev-chain simulator.
//!
//! [`FakeChain`] is an in-memory stand-in for a simulator node that answers the handful of
//! JSON-RPC methods the controller uses, records every call, and can be told to fail specific
//! methods. [`SimTestHarness`] wires a controller to it.

pub mod fake_chain;
pub mod harness;

pub use fake_chain::FakeChain;
pub use harness::SimTestHarness;
