pub mod change;
pub mod observations;
pub mod results;
