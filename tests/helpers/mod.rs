//! Test helpers module
//!
//! Test context over the in-memory store, request fixtures, and the
//! PostgreSQL container helper.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use test_context::*;
pub use test_data::*;
