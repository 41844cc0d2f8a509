pub mod types;
pub mod wide;
