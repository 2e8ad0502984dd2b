//! Data models used by the HTTP API
//!
//! Request and response bodies plus the hex parsing helpers shared by the
//! transaction endpoints.

// JSON-RPC envelope and transaction call objects
pub mod jsonrpc;
// Plain JSON bodies for the REST-style endpoints
pub mod responses;
