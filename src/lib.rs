pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod orb;
pub mod report;
pub mod system;
pub mod ui;
