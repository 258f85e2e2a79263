//! # Infrastructure Layer
//!
//! Storage adapters for the market registry.

pub mod persistence;
