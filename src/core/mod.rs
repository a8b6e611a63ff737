pub mod types;
pub mod search_server;
pub mod config;
pub mod error;
pub mod stats;
