//! # Rift Dashboard
//!
//! A League of Legends pro player performance dashboard and stats API.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (player records, chart configurations)
//! - **calculate**: Leaderboard ranking and per-position aggregation
//! - **dashboard**: The dashboard controller and its chart renderers
//! - **fetch**: HTTP client for loading player records from the API
//! - **storage**: Dataset file loading (CSV, JSON)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod models;
pub mod storage;

pub use models::*;

/// Uppercase the first letter of a string, lowercasing the rest
/// (e.g., "top" -> "Top", "JUNGLE" -> "Jungle").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
