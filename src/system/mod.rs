//! # Process-level services
//!
//! - **`logging`**: one-time setup of the `log` sink (stderr or an append-mode file).
//! - **`shutdown`**: exit hooks that flush deferred state exactly once.

pub mod logging;
pub mod shutdown;
