pub mod config;
pub mod document;
pub mod records;
pub mod storage;
pub mod telemetry;

pub use document::{Document, Fields, Record, server_timestamp};
