//! METAR weather daemon.
//!
//! Fetches the latest surface weather report for one station, decides
//! whether the locally cached copy is stale, decodes the raw report text
//! into structured weather, and persists the result as JSON.

pub mod config;
pub mod decode;
pub mod display;
pub mod domain;
pub mod fetch;
pub mod reconcile;
pub mod retry;
pub mod staleness;
pub mod store;
pub mod update;
