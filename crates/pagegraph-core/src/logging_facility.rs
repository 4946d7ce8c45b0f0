//! Structured logging facility
//!
//! The kernel itself never installs a subscriber; it only emits events.
//! Hosts (the CLI, tests) call [`init`] once to choose where they go.
//!
//! - Single initialization point via `init(profile)`
//! - Canonical macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   whose field keys come from `pagegraph_core_types::schema`
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use pagegraph_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
