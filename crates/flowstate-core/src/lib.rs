//! flowstate-core library.
//!
//! Derives a status, a reason, a priority and staleness for each workflow in
//! a unified issue-tracker and code-review activity log.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at module boundaries
//!   ([`error::DatasetError`]), `anyhow::Result` for config loading. The
//!   inference engine is total and never fails.
//! - **Logging**: `tracing` macros (`debug!` on load, `warn!` per dataset
//!   issue, `trace!` per rule match). No subscriber is installed here.
//! - **Time**: every time-dependent call takes `now` explicitly.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use flowstate_core::infer::{WorkflowState, infer};
//!
//! let inference = infer(std::iter::empty(), Utc::now());
//! assert_eq!(inference.state, WorkflowState::AutomationWorking);
//! assert_eq!(inference.reason.to_string(), "Starting development");
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod event;
pub mod extract;
pub mod infer;
pub mod model;
pub mod order;
pub mod present;
pub mod summary;

#[cfg(test)]
mod test_support;
