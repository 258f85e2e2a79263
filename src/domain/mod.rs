//! # Domain Layer
//!
//! Market configuration entities and their value objects. Nothing in this
//! layer knows about storage engines.

pub mod entities;
pub mod value_objects;
