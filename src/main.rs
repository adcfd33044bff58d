#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

mod runtime;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use csv_quickview::cli::CliArgs;
use csv_quickview::config::ViewerConfig;
use csv_quickview::messages::Msg;

use runtime::App;

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    csv_quickview::tracing::init();

    let startup = CliArgs::parse().into_config(ViewerConfig::load());
    match &startup.file_url {
        Some(url) => tracing::info!("Starting viewer for {}", url),
        None => tracing::warn!("Starting viewer without a file URL"),
    }

    let event_loop = EventLoop::<Msg>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    let mut app = App::new(startup, event_loop.create_proxy());

    event_loop
        .run_app(&mut app)
        .context("Event loop exited with an error")?;

    Ok(())
}
