//! Crop recommendation, rotation planning and yield estimation.
//!
//! The resolvers in [`logic`] combine a remote prediction service
//! ([`datasources`]) with read-only local tables ([`knowledge`]) and always
//! hand back a display-ready value or a typed [`error::CropWiseError`].

pub mod cli;
pub mod config;
pub mod datasources;
pub mod error;
pub mod knowledge;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{CropWiseError, Result};
