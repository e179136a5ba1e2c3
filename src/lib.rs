//! Goatboard - Consensus GOAT-List Ranking Backend
//!
//! This crate implements an adaptive pairwise ranking engine: users rank a
//! pool of players through head-to-head matchup votes, and the engine
//! converges on a total order without requiring every possible comparison.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
