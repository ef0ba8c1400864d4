//! embolia-core
//!
//! Pure domain types for the pulmonary embolism decision pathway: the
//! clinical observations entered by the clinician, the score results derived
//! from them, and the update function that keeps coupled fields consistent.
//! No scoring logic lives here.

pub mod error;
pub mod models;
pub mod numeric;
