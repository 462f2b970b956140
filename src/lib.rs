pub mod assets;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod presenter;
pub mod reader;
pub mod session;
pub mod ui;
pub mod viewport;
