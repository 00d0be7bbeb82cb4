pub mod api;
pub mod config;
pub mod debug;
pub mod error;
pub mod extract;
pub mod offerings;
pub mod runtime;
pub mod types;
