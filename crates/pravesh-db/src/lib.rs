//! Persistence layer: diesel-async/Postgres schema, models, and queries
//! for admission records and registered users.

pub mod db;
pub mod error;
pub mod model;
