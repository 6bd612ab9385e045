//! Simple cli for tracking daily worked hours against a configurable
//! schedule. Record the odd weekend shift or day off, and get current and
//! previous month totals with the extra workdays called out.
//!

pub mod accounting;
pub mod cli;
pub mod storage;
pub mod utils;
