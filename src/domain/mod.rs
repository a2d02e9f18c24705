//! Core domain types and logic.

pub mod instrument;
pub mod market;
pub mod portfolio;
pub mod settings;
pub mod error;
