//! The portal's deterministic calculators: student payment, rent assistance,
//! and the score pipeline. Everything in here is a pure function over the
//! caller's inputs and a read-only policy table.

pub mod atar;
pub mod rent_assistance;
mod service;
pub mod student_payment;

pub use service::{AssessmentError, AssessmentService, HousingCosts, TransitionAssessment};
