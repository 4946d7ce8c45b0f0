//! Core types shared across pagegraph facilities
//!
//! This crate provides foundational types used by the kernel's logging
//! facility and by the process edge that drives it:
//!
//! - **Correlation types**: RunId, RunContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RunContext, RunId};
