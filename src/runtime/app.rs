use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy};
use winit::window::{Window, WindowId};

use csv_quickview::cli::StartupConfig;
use csv_quickview::clipboard::SystemClipboard;
use csv_quickview::loader::FileSource;
use csv_quickview::messages::Msg;
use csv_quickview::Driver;

use super::webview::WebviewSurface;

type ViewerDriver = Driver<WebviewSurface, SystemClipboard, FileSource>;

pub struct App {
    startup: Option<StartupConfig>,
    proxy: EventLoopProxy<Msg>,
    // Declared before `window` so the webview is dropped first
    driver: Option<ViewerDriver>,
    window: Option<Window>,
}

impl App {
    pub fn new(startup: StartupConfig, proxy: EventLoopProxy<Msg>) -> Self {
        Self {
            startup: Some(startup),
            proxy,
            driver: None,
            window: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some(startup) = self.startup.take() else {
            return Ok(());
        };
        let (width, height) = (startup.viewer.window_width, startup.viewer.window_height);
        let model = startup.into_model();

        let window_attributes = Window::default_attributes()
            .with_title(model.title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = event_loop.create_window(window_attributes)?;

        let surface = WebviewSurface::new(&window, self.proxy.clone())?;
        tracing::info!("Viewer window created ({}x{})", width, height);

        self.driver = Some(Driver::new(
            model,
            surface,
            SystemClipboard::default(),
            FileSource,
        ));
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler<Msg> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to create viewer window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = &self.window else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(driver) = &self.driver {
                    let size = size.to_logical::<f64>(window.scale_factor());
                    driver.surface().resize(size.width, size.height);
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, msg: Msg) {
        if let Some(driver) = &mut self.driver {
            driver.dispatch(msg, Instant::now());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(driver) = &mut self.driver else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        driver.tick(Instant::now());
        event_loop.set_control_flow(match driver.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        });
    }
}
