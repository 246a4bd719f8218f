pub mod counters;
pub mod smart;
pub mod unit;
pub mod volume;
