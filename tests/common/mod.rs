//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::{Duration, Instant};

use csv_quickview::clipboard::MemoryClipboard;
use csv_quickview::config::ViewerConfig;
use csv_quickview::loader::{LoadError, TextSource};
use csv_quickview::messages::{AppMsg, CsvMsg};
use csv_quickview::model::AppModel;
use csv_quickview::surface::RecordingSurface;
use csv_quickview::Driver;

/// Text source serving fixed contents by URL
#[derive(Debug, Default)]
pub struct StaticSource {
    files: HashMap<String, String>,
}

impl StaticSource {
    pub fn with(url: &str, text: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(url.to_string(), text.to_string());
        Self { files }
    }
}

impl TextSource for StaticSource {
    fn fetch_text(&self, file_url: &str) -> Result<String, LoadError> {
        self.files
            .get(file_url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(file_url.into()))
    }
}

pub type TestDriver = Driver<RecordingSurface, MemoryClipboard, StaticSource>;

pub const TEST_URL: &str = "file:///data/people.csv";

/// Driver over a recording surface with `text` served at [`TEST_URL`]
pub fn driver_for(text: &str) -> TestDriver {
    driver_with_config(text, ViewerConfig::default())
}

pub fn driver_with_config(text: &str, config: ViewerConfig) -> TestDriver {
    let model = AppModel::new(config, Some(TEST_URL.to_string()));
    Driver::new(
        model,
        RecordingSurface::new(),
        MemoryClipboard::new(),
        StaticSource::with(TEST_URL, text),
    )
}

/// Page reports ready at `viewport_height` and a measured row height of 30px
pub fn open(driver: &mut TestDriver, viewport_height: f64, now: Instant) {
    driver.dispatch(AppMsg::PageReady { viewport_height }, now);
    driver.dispatch(CsvMsg::RowMeasured { height: 30.0 }, now);
}

/// A loaded driver at 600px viewport
pub fn opened(text: &str, now: Instant) -> TestDriver {
    let mut driver = driver_for(text);
    open(&mut driver, 600.0, now);
    driver
}

/// CSV text with a header `id,name,score` and `rows` data rows
pub fn numbered_csv(rows: usize) -> String {
    let mut text = String::from("id,name,score\n");
    for i in 0..rows {
        text.push_str(&format!("{},name{},{}\n", i, i, (i * 7919) % 1000));
    }
    text
}

/// First column of every visible data row, in view order
pub fn first_column(driver: &TestDriver) -> Vec<String> {
    let Some(csv) = driver.model().csv() else {
        return Vec::new();
    };
    (0..csv.visible_row_count())
        .filter_map(|i| csv.visible_cell(i, 0))
        .map(str::to_string)
        .collect()
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
