pub mod config;
pub mod documents;
pub mod platform;
pub mod repositories;
