//! BJU Tracker Library
//!
//! Core functionality for tracking food products and meal BJU totals
//! (Б/Ж/У: protein, fat, carbohydrate).

pub mod build_info;
pub mod config;
pub mod email;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod store;
pub mod tools;
