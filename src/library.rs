pub mod error;
pub mod jpeg;
pub mod log;
pub mod marker;
pub mod segment;
pub mod source;
pub mod write;
