//! Core library for the `weatherapi` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The HTTP client for the current conditions and alerts endpoints
//! - Shared domain models (location queries, replies, decoded payloads)
//!
//! It is used by `weatherapi-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{WeatherApi, WeatherApiClient};
pub use config::{ClientConfig, Config, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use model::{AlertsReport, CurrentConditions, LocationQuery, Outcome, RawResponse, Reply};
pub use reqwest::{StatusCode, header::HeaderMap};
