//! Grid spreadsheet integration
//!
//! The API client plus the Project X revenue model tools built on it.

pub mod client;
pub mod model;

// Re-export commonly used types
pub use client::{GridClient, GridError};
pub use model::ProjectXRevenueModel;
