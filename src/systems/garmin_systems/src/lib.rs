pub mod config;
pub mod navigation;
