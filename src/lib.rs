//! CSV QuickView - Elm-style CSV viewer
//!
//! This crate provides the parser, table engine and update loop for a
//! virtualized, searchable, sortable CSV viewer. Display happens through a
//! [`surface::DisplaySurface`]; the desktop binary backs it with a webview.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod driver;
pub mod ipc;
pub mod loader;
pub mod messages;
pub mod model;
pub mod scheduler;
pub mod surface;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ViewerConfig;
pub use driver::Driver;
pub use messages::Msg;
pub use model::AppModel;
