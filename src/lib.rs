//! Listing extraction and neighborhood risk scoring for real-estate pages.

pub mod analysis;
pub mod bridge;
pub mod config;
pub mod error;
pub mod models;
pub mod panel;
pub mod render;
pub mod scrapers;
pub mod store;

pub use error::{Result, ScoutError};
