//! Static snapshot generator for CSV QuickView
//!
//! Runs the viewer headlessly against a file and writes the resulting page,
//! with the table state baked in, as a standalone HTML file.
//!
//! Usage:
//!   cargo run --bin snapshot -- data.csv --out snapshot.html
//!   cargo run --bin snapshot -- file:///tmp/data.csv --search oslo --sort 2 --sort 2
//!   cargo run --bin snapshot -- data.csv --scroll 6000 --viewport 900

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use csv_quickview::clipboard::MemoryClipboard;
use csv_quickview::config::ViewerConfig;
use csv_quickview::loader::FileSource;
use csv_quickview::messages::{AppMsg, CsvMsg};
use csv_quickview::model::AppModel;
use csv_quickview::surface::RecordingSurface;
use csv_quickview::view::{self, page};
use csv_quickview::Driver;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "snapshot", about = "Render a static HTML snapshot of a CSV file")]
struct Args {
    /// File to render, as a file URL or path
    #[arg(value_name = "FILE_URL")]
    file_url: String,
    /// Output HTML file
    #[arg(long, default_value = "snapshot.html")]
    out: PathBuf,
    /// Search term to apply
    #[arg(long)]
    search: Option<String>,
    /// Click a column header (repeat to cycle asc → desc → none)
    #[arg(long = "sort", value_name = "COL")]
    sorts: Vec<usize>,
    /// Treat the first row as data
    #[arg(long)]
    no_header: bool,
    /// Scroll offset in pixels
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,
    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    viewport: f64,
    /// Row height in pixels (as if measured by the page)
    #[arg(long, default_value_t = 30.0)]
    row_height: f64,
}

/// Far enough ahead that every pending timer is due
const SETTLE: Duration = Duration::from_secs(3600);

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ViewerConfig::load();
    if args.no_header {
        config.header_row = false;
    }
    let model = AppModel::new(config, Some(args.file_url.clone()));
    let mut driver = Driver::new(
        model,
        RecordingSurface::new(),
        MemoryClipboard::new(),
        FileSource,
    );

    let start = Instant::now();
    driver.dispatch(
        AppMsg::PageReady {
            viewport_height: args.viewport,
        },
        start,
    );
    driver.dispatch(
        CsvMsg::RowMeasured {
            height: args.row_height,
        },
        start,
    );

    if let Some(term) = args.search {
        driver.dispatch(CsvMsg::SearchInput { term }, start);
    }
    for column in args.sorts {
        driver.dispatch(CsvMsg::Sort { column }, start);
        driver.tick(start + SETTLE);
    }
    driver.tick(start + SETTLE);
    driver.dispatch(
        CsvMsg::Scrolled {
            offset: args.scroll,
        },
        start + SETTLE,
    );

    let model = driver.model();
    if let Some(csv) = model.csv() {
        let (shown, total) = csv.stats();
        let window = csv.window();
        eprintln!(
            "{}: showing {} of {} rows, rendering rows {}..{}",
            model.title, shown, total, window.start, window.end
        );
    } else {
        eprintln!("{}: no table (panel only)", model.title);
    }

    let frame = view::full_frame(model);
    let html = page::snapshot_html(&frame, args.scroll).context("serializing frame")?;
    std::fs::write(&args.out, html)
        .with_context(|| format!("writing {}", args.out.display()))?;
    eprintln!("Saved {}", args.out.display());

    Ok(())
}
