//! Pipeline module.
//!
//! Provides the ordered node registry (`Pipe`), identity management,
//! inter-node wiring and the sequential run loop, plus record export for
//! bookkeeping (`to_record` / `to_json` / `dump`).

pub mod core;
pub mod record;

pub use core::Pipe;
