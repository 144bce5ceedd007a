pub mod amortize;
pub mod schedule;
