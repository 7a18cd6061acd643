//! Operations over the persistence layer: the record lifecycle
//! (validate → derive → persist), attachment uploads, spreadsheet export,
//! and registration/login.

pub mod auth;
pub mod error;
pub mod export;
pub mod record;
pub mod upload;
