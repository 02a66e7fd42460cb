//! Heuristic real-estate valuation for Bosnia & Herzegovina listings:
//! comparable-based price estimation, listing search, and demo market
//! forecasts, exposed as a library plus an HTTP/CLI surface.

pub mod catalog;
pub mod config;
pub mod error;
pub mod forecast;
pub mod search;
pub mod telemetry;
pub mod valuation;
