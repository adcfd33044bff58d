//! Webview display surface
//!
//! Hosts the viewer page in a wry WebView filling the window. Page events
//! come back through the IPC handler as [`Msg`]s on the event loop; frames
//! go out through `evaluate_script`.

use winit::event_loop::EventLoopProxy;
use winit::window::Window;
use wry::{Rect, WebView, WebViewBuilder};

use csv_quickview::ipc::parse_page_event;
use csv_quickview::messages::Msg;
use csv_quickview::surface::{DisplaySurface, Frame};
use csv_quickview::view::page;

pub struct WebviewSurface {
    webview: WebView,
}

impl WebviewSurface {
    pub fn new(window: &Window, proxy: EventLoopProxy<Msg>) -> Result<Self, wry::Error> {
        let webview = WebViewBuilder::new()
            .with_html(page::page_html())
            .with_transparent(false)
            .with_ipc_handler(move |request| {
                if let Some(msg) = parse_page_event(request.body()) {
                    if proxy.send_event(msg).is_err() {
                        tracing::debug!("Event loop closed, dropping page event");
                    }
                }
            })
            .with_navigation_handler(|url| {
                // The page is self-contained; external links stay blocked
                if url.starts_with("http://") || url.starts_with("https://") {
                    tracing::warn!("Blocked navigation to {}", url);
                    false
                } else {
                    true
                }
            })
            .build(window)?;

        Ok(Self { webview })
    }

    /// Keep the webview filling the window (logical size)
    pub fn resize(&self, width: f64, height: f64) {
        use wry::dpi::{LogicalPosition, LogicalSize};

        let bounds = Rect {
            position: LogicalPosition::new(0.0, 0.0).into(),
            size: LogicalSize::new(width, height).into(),
        };
        if let Err(e) = self.webview.set_bounds(bounds) {
            tracing::warn!("Failed to resize webview: {}", e);
        }
    }
}

impl DisplaySurface for WebviewSurface {
    fn apply(&mut self, frame: &Frame) {
        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize frame: {}", e);
                return;
            }
        };
        let js = format!("window.__applyFrame({});", json);
        if let Err(e) = self.webview.evaluate_script(&js) {
            tracing::error!("Failed to apply frame: {}", e);
        }
    }
}
