//! View module - turns the model into display patches
//!
//! Each function builds one kind of [`Frame`]. The full frame replaces
//! everything; the others are the narrow updates used on hot paths
//! (scrolling, busy indicator, tooltip).

pub mod page;

use crate::csv::render::{self, PanelKind};
use crate::csv::CsvState;
use crate::model::{AppModel, LoadState};
use crate::surface::{Frame, Patch};

/// Everything: title, panel or table, stats, overlay
pub fn full_frame(model: &AppModel) -> Frame {
    let mut frame = Frame::new();
    frame.push(Patch::Title {
        text: model.title.clone(),
    });

    match &model.load {
        // Still a table underneath: the toolbar stays so the header toggle
        // can bring the row back
        LoadState::Ready(csv) if csv.is_header_only() => {
            frame.push(Patch::Panel {
                html: header_only_panel(model),
                toolbar: true,
            });
            push_stats(&mut frame, csv);
        }
        LoadState::Ready(csv) => push_table(&mut frame, csv),
        other => frame.push(Patch::Panel {
            html: panel_for(model, other),
            toolbar: false,
        }),
    }

    push_overlay(&mut frame, model);
    frame
}

/// Only the rendered row window
pub fn rows_frame(model: &AppModel) -> Frame {
    let mut frame = Frame::new();
    if let Some(csv) = model.csv() {
        frame.push(body_patch(csv));
    }
    frame
}

/// Busy indicator and tooltip
pub fn overlay_frame(model: &AppModel) -> Frame {
    let mut frame = Frame::new();
    push_overlay(&mut frame, model);
    frame
}

/// Sample row for height measurement, once a table is up
pub fn measure_frame(model: &AppModel) -> Frame {
    let mut frame = Frame::new();
    if let Some(csv) = model.csv() {
        frame.push(Patch::Measure {
            html: render::sample_row_html(csv.column_count()),
        });
    }
    frame
}

/// Search box and header checkbox values
pub fn controls_frame(model: &AppModel) -> Frame {
    Frame {
        patches: vec![Patch::Controls {
            search: model.ui.search_input.clone(),
            header: model.ui.header_row,
        }],
    }
}

fn push_table(frame: &mut Frame, csv: &CsvState) {
    frame.push(Patch::Panel {
        html: String::new(),
        toolbar: true,
    });
    frame.push(Patch::Header {
        html: render::header_html(csv),
    });
    frame.push(Patch::Spacer {
        height: csv.viewport.spacer_height(csv.visible_row_count()),
    });
    frame.push(body_patch(csv));
    push_stats(frame, csv);
}

fn push_stats(frame: &mut Frame, csv: &CsvState) {
    let (shown, total) = csv.stats();
    frame.push(Patch::Stats {
        text: render::stats_text(shown, total),
    });
}

fn body_patch(csv: &CsvState) -> Patch {
    let window = csv.window();
    Patch::Body {
        html: render::body_html(csv),
        offset: csv.viewport.block_offset(window),
    }
}

fn push_overlay(frame: &mut Frame, model: &AppModel) {
    frame.push(Patch::Busy {
        visible: model.ui.busy,
    });
    frame.push(match &model.ui.tooltip {
        Some(tooltip) => Patch::Tooltip {
            text: tooltip.text.clone(),
            x: tooltip.x,
            y: tooltip.y,
        },
        None => Patch::HideTooltip,
    });
}

fn header_only_panel(model: &AppModel) -> String {
    render::panel_html(
        PanelKind::Info,
        "CSV Contains Only a Header",
        &format!(
            "The file '{}' has column headers but no data rows to display.",
            model.title
        ),
    )
}

fn panel_for(model: &AppModel, load: &LoadState) -> String {
    let name = &model.title;
    match load {
        LoadState::Loading => render::panel_html(
            PanelKind::Info,
            "Loading CSV",
            &format!("Reading '{}'...", name),
        ),
        LoadState::Failed(_) if model.file_url.is_none() => {
            render::panel_html(PanelKind::Error, "Error: No file URL specified.", "")
        }
        LoadState::Failed(message) => render::panel_html(
            PanelKind::Error,
            &format!("Error loading CSV: {}", name),
            message,
        ),
        LoadState::Empty => render::panel_html(
            PanelKind::Warning,
            "CSV File is Empty",
            &format!("The file '{}' contains no content.", name),
        ),
        LoadState::Unparsable => render::panel_html(
            PanelKind::Error,
            &format!("Error loading CSV: {}", name),
            "Could not parse the file content as a valid CSV.",
        ),
        LoadState::Ready(_) => String::new(),
    }
}
