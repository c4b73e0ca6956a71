pub mod collections;
pub mod finding;
