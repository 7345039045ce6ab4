//! # Integration Scenarios
//!
//! Each scenario links two or three devices through an `InMemoryMedium` and
//! checks the events every device reports.

#[cfg(test)]
pub(crate) mod fixtures;

pub mod discovery;
pub mod match_filters;
