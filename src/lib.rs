//! City Suggest: fuzzy city-name autocomplete.
//!
//! The matching core lives in [`suggest`]; [`server`] exposes it over HTTP
//! and the `city-suggest` binary on the command line.

pub mod config;
pub mod server;
pub mod suggest;
pub mod telemetry;
