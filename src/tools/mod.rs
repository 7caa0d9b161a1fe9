//! Tools module
//!
//! Operation implementations behind the MCP tool surface. Each function takes
//! plain values, works against the injected stores, and returns a serializable
//! response or a String error for the transport layer to report.

pub mod meals;
pub mod products;
pub mod status;
