pub mod counters;
pub mod theater;
