//! Shared utilities for the ethvault workspace.

pub mod logging;

pub use logging::init_tracing;
