pub mod api;
pub mod app;
pub mod config;
pub mod inbox;
pub mod logging;
pub mod ui;
