//! Domain logic for the admission record service.
//!
//! Everything in this crate is pure: form state, field validation,
//! derivation of computed fields, and the static district reference data.
//! Persistence and transport live in the other workspace crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
