pub mod ddimer;
pub mod hestia;
pub mod perc;
pub mod risk;
pub mod wells;
pub mod years;
