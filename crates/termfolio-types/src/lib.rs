//! Foundation types for termfolio.
//!
//! This crate holds the platform-agnostic types shared by every termfolio
//! crate: the profile record, terminal line entries, configuration, and
//! error types.

pub mod config;
pub mod error;
pub mod line;
pub mod profile;
