pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod narrative;
pub mod orchestrator;
pub mod processing;
pub mod state;
pub mod ui;
