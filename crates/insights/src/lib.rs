pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod search;
