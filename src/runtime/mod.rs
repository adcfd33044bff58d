//! Runtime module - winit/platform integration
//!
//! This module contains platform-specific code for running the viewer:
//! - `app` - ApplicationHandler and window management
//! - `webview` - The webview that displays the viewer page

pub mod app;
pub mod webview;

pub use app::App;
