//! AssetDesk API server library.
//!
//! Exposes the building blocks (config, state, services, error handling,
//! routes) so integration tests and the binaries can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
