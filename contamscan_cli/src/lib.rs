//! contamscan CLI library
//!
//! Configuration, report formatting and orchestration for the `contamscan`
//! binary. Exposed as a library so integration tests can drive a scan
//! without spawning a process.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod terminal;
