//! SeaORM entities

pub mod programs;
pub mod reports;
