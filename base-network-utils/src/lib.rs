//! Gas pricing, transaction and balance helpers for the Base network.
//!
//! [`BaseNetworkUtils`] wraps an alloy provider bound to Base mainnet or
//! Base Sepolia. The `api` module exposes it over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod gas;
pub mod models;
pub mod network;
pub mod rpc;
pub mod utils;

pub use error::ServiceError;
pub use gas::{buffered_estimate, compute_tiers, GasPriceTiers};
pub use network::{Network, NetworkProfile, BASE_MAINNET, BASE_SEPOLIA};
pub use utils::{BaseNetworkUtils, HealthStatus, SubmissionReceipt};
