//! Analysis stages for grade records.
//!
//! The validator reports the loaded table's shape, the filter narrows it to
//! composition courses, and the aggregator tabulates grade frequencies and
//! normalized percentages.

pub mod aggregate;
pub mod filter;
pub mod types;
pub mod utility;
pub mod validate;
