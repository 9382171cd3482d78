//! Domain types, errors, and pure SQL helpers shared by the Jobly crates.

pub mod error;
pub mod sql;
pub mod types;
pub mod validation;
