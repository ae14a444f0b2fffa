pub mod error;
pub mod raw_event;
pub mod types;
