//! embolia-pathway
//!
//! The four-stage PE pathway (diagnostic, risk stratification, treatment,
//! disposition) on top of `embolia-scores`, and the [`case::PatientCase`]
//! session that drives it.

pub mod case;
pub mod diagnostic;
pub mod disposition;
pub mod error;
pub mod recommendation;
pub mod stage;
pub mod stratification;
pub mod summary;
pub mod tiers;
pub mod treatment;
