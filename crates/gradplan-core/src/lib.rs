//! Degree plan engine: deterministic, synchronous plan management for
//! multi-semester course schedules.
//!
//! The engine covers timeline generation, template materialization, the
//! previous/present/future status partition, prerequisite and credit-load
//! validation, course placement, and plan metrics (GPA, completed credits,
//! elective-bucket progress).
//!
//! Everything except materialization is a pure function over a
//! [`model::PlanSnapshot`]: operations return a new snapshot or a structured
//! rejection, and the caller persists the result. Materialization is the one
//! multi-step operation against the [`materialize::PlanStore`] seam and is
//! idempotent, so an interrupted run is recovered by invoking it again.

pub mod catalog;
pub mod credits;
pub mod materialize;
pub mod metrics;
pub mod model;
pub mod placement;
pub mod prereq;
pub mod registrar;
pub mod status;
pub mod timeline;

#[cfg(test)]
mod test_util;
