//! # Homecheck Checker
//!
//! Queries the listing site's property-count endpoint with a fixed search
//! filter and pushes a notification when properties are available.
//!
//! One call to [`AvailabilityChecker::run`] is one invocation. Nothing is
//! persisted between invocations, so repeated runs repeat the alert.

mod checker;
mod count;
mod error;
mod filter;
mod request;
mod result;

pub use checker::{alert_message, AvailabilityChecker, TEST_MESSAGE};
pub use count::extract_count;
pub use error::CheckError;
pub use filter::SearchFilter;
pub use request::InvocationRequest;
pub use result::{CheckMode, CheckResult};
