//! Derived attributes shown next to a workflow's state.
//!
//! Everything here is total: missing labels, URLs or creation events yield
//! `None` (or an empty label), never an error.

pub mod links;
pub mod priority;
pub mod range;
pub mod time;

pub use links::{KEY_PLACEHOLDER, code_review_url, issue_tracker_url};
pub use priority::{Priority, priority_from_events};
pub use range::{DateRange, creation_date, is_in_date_range};
pub use time::{relative_since, relative_time};
