pub mod day;
pub mod observation;
pub mod parameters;
