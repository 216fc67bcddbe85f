pub mod add;
pub mod config;
