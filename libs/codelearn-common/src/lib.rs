pub mod problems;
pub mod types;
