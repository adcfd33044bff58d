//! Messages posted by the viewer page
//!
//! The page sends small JSON objects tagged by `type`; each maps to one
//! [`Msg`]. Anything that fails to parse is logged and dropped.

use serde::Deserialize;

use crate::messages::{AppMsg, CsvMsg, Msg};

/// An event reported by the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageEvent {
    /// Page loaded; reports the scroll container height
    Ready {
        #[serde(rename = "viewportHeight")]
        viewport_height: f64,
    },
    /// Sample row measured (`null` when the page got NaN)
    Measured {
        #[serde(rename = "rowHeight")]
        row_height: Option<f64>,
    },
    Scroll {
        offset: f64,
    },
    Resize {
        #[serde(rename = "viewportHeight")]
        viewport_height: f64,
    },
    Search {
        term: String,
    },
    ClearSearch,
    ToggleHeader {
        enabled: bool,
    },
    Sort {
        column: usize,
    },
    /// Double-click on a body cell; `row` is the view index from `data-row`
    CopyCell {
        row: usize,
        column: usize,
        x: f64,
        y: f64,
    },
}

impl PageEvent {
    pub fn into_msg(self) -> Msg {
        match self {
            PageEvent::Ready { viewport_height } => AppMsg::PageReady { viewport_height }.into(),
            PageEvent::Measured { row_height } => CsvMsg::RowMeasured {
                height: row_height.unwrap_or(0.0),
            }
            .into(),
            PageEvent::Scroll { offset } => CsvMsg::Scrolled { offset }.into(),
            PageEvent::Resize { viewport_height } => CsvMsg::Resized {
                height: viewport_height,
            }
            .into(),
            PageEvent::Search { term } => CsvMsg::SearchInput { term }.into(),
            PageEvent::ClearSearch => CsvMsg::ClearSearch.into(),
            PageEvent::ToggleHeader { enabled } => CsvMsg::SetHeaderMode(enabled).into(),
            PageEvent::Sort { column } => CsvMsg::Sort { column }.into(),
            PageEvent::CopyCell { row, column, x, y } => {
                CsvMsg::CopyCell { row, column, x, y }.into()
            }
        }
    }
}

/// Parse a raw IPC body into a message
pub fn parse_page_event(body: &str) -> Option<Msg> {
    match serde_json::from_str::<PageEvent>(body) {
        Ok(event) => Some(event.into_msg()),
        Err(e) => {
            tracing::warn!("Ignoring malformed page message {:?}: {}", body, e);
            None
        }
    }
}
