//! Core error types shared by the hydrus crates
//!
//! This crate provides pure data types for error handling, with no dependencies
//! on HTTP frameworks. It includes:
//! - `Failure`, the `(status, message)` pair every layer reports
//! - Error catalog support (`ErrDef`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod failure;

pub use catalog::ErrDef;
pub use failure::{APPLICATION_LD_JSON, Failure};
