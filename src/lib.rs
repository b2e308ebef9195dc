//! Calculation engine for the student transition portal.
//!
//! The portal's web layer collects declared circumstances and renders
//! results; everything with algorithmic content lives here as pure,
//! synchronous functions: the student-payment eligibility engine, the
//! rent-assistance supplement, and the subject-score scaling pipeline,
//! each evaluated against versioned policy tables supplied by the caller.

pub mod calculators;
pub mod config;
pub mod error;
pub mod policy;
pub mod telemetry;
