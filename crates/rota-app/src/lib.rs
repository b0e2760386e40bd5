pub mod config;
pub mod error;
pub mod render;
pub mod view;
