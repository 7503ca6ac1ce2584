#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytical query layer over derived crime incidents.
//!
//! The engine is split into stateless stages that the question functions in
//! [`questions`] compose:
//!
//! * [`aggregate`] groups rows by typed columns and counts them.
//! * [`rank`] assigns competition ranks within partitions and keeps the
//!   top N.
//! * [`compare`] computes year-over-year deltas per crime category.
//!
//! Every function takes the derived table as an argument; nothing is cached
//! between calls.

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod questions;
pub mod rank;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Percentage change requested for a category with no base-year reports.
    #[error("Percentage change undefined for '{category}': no reports in {base_year}")]
    DivisionByZero {
        /// Crime category.
        category: String,
        /// The base year with a zero count.
        base_year: i32,
    },

    /// Year-over-year comparison of a year with itself.
    #[error("Cannot compare year {year} with itself")]
    SameYear {
        /// The repeated year.
        year: i32,
    },

    /// Configuration values that cannot be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
