//! Adapters - implementations of ports against real infrastructure.
//!
//! - `postgres` - sqlx-backed session, vote, and pool persistence
//! - `catalog` - CSV-backed item catalog with precomputed stat ranks
//! - `http` - axum REST API

pub mod catalog;
pub mod http;
pub mod postgres;
