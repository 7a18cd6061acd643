//! HTTP surface of the admission record service.

pub mod app;
pub mod config;
pub mod db_handler;
pub mod error;
