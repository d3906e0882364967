//! Trackboard API server module
//!
//! Provides the HTTP REST API the board front end consumes.
//! Run with `trackboard serve` or `trackboard-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
