pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widgets;
