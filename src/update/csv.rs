//! CSV table update functions
//!
//! Handles CsvMsg messages: scrolling, search, sort, header mode, copy.

use crate::commands::Cmd;
use crate::messages::CsvMsg;
use crate::model::AppModel;

/// Text shown in the tooltip after a successful copy
pub const COPIED_TOOLTIP: &str = "Copied!";

/// Handle CSV table messages
pub fn update_csv(model: &mut AppModel, msg: CsvMsg) -> Option<Cmd> {
    match msg {
        CsvMsg::RowMeasured { height } => row_measured(model, height),
        CsvMsg::Scrolled { offset } => scrolled(model, offset),
        CsvMsg::Resized { height } => resized(model, height),

        CsvMsg::SearchInput { term } => search_input(model, term),
        CsvMsg::ApplySearch { generation } => apply_search(model, generation),
        CsvMsg::ClearSearch => clear_search(model),

        CsvMsg::SetHeaderMode(enabled) => set_header_mode(model, enabled),

        CsvMsg::Sort { column } => sort(model, column),
        CsvMsg::RunSort { column } => run_sort(model, column),

        CsvMsg::CopyCell { row, column, x, y } => copy_cell(model, row, column, x, y),
        CsvMsg::CopyConfirmed { x, y } => copy_confirmed(model, x, y),
        CsvMsg::TooltipExpired { id } => tooltip_expired(model, id),
    }
}

fn row_measured(model: &mut AppModel, height: f64) -> Option<Cmd> {
    let fallback = model.config.fallback_row_height;
    let csv = model.csv_mut()?;
    let row_height = csv.viewport.set_measured_row_height(height, fallback);
    tracing::debug!("Row height set to {}px", row_height);
    Some(Cmd::Redraw)
}

/// Scroll fast path: only the row window is redrawn, and only when the
/// offset moved at least epsilon since the last draw
fn scrolled(model: &mut AppModel, offset: f64) -> Option<Cmd> {
    let csv = model.csv_mut()?;
    if !csv.viewport.scroll_to(offset) {
        return None;
    }
    csv.viewport.mark_rendered();
    Some(Cmd::RedrawRows)
}

fn resized(model: &mut AppModel, height: f64) -> Option<Cmd> {
    model.ui.viewport_height = height;
    let csv = model.csv_mut()?;
    csv.viewport.resize(height);
    csv.viewport.mark_rendered();
    Some(Cmd::RedrawRows)
}

/// Record input and (re)start the debounce; the previous timer is
/// superseded by the generation bump
fn search_input(model: &mut AppModel, term: String) -> Option<Cmd> {
    let generation = model.ui.bump_search(term);
    model.csv()?;
    Some(Cmd::ScheduleSearch {
        generation,
        delay: model.config.search_debounce(),
    })
}

fn apply_search(model: &mut AppModel, generation: u64) -> Option<Cmd> {
    if generation != model.ui.search_generation {
        tracing::debug!(
            "Skipping stale search: generation {} != current {}",
            generation,
            model.ui.search_generation
        );
        return None;
    }

    let input = model.ui.search_input.clone();
    let csv = model.csv_mut()?;
    csv.set_search_term(&input);
    Some(Cmd::Redraw)
}

fn clear_search(model: &mut AppModel) -> Option<Cmd> {
    model.ui.bump_search(String::new());
    match model.csv_mut() {
        Some(csv) => {
            csv.set_search_term("");
            Some(Cmd::batch(vec![Cmd::Redraw, Cmd::SyncControls]))
        }
        None => Some(Cmd::SyncControls),
    }
}

fn set_header_mode(model: &mut AppModel, enabled: bool) -> Option<Cmd> {
    model.ui.header_row = enabled;
    let csv = model.csv_mut()?;
    csv.set_header_mode(enabled);
    Some(Cmd::Redraw)
}

/// First half of a sort: show the busy indicator and defer the work to the
/// next turn of the event loop
fn sort(model: &mut AppModel, column: usize) -> Option<Cmd> {
    let column_count = model.csv()?.column_count();
    if column >= column_count {
        tracing::warn!(
            "Ignoring sort on column {} (table has {})",
            column,
            column_count
        );
        return None;
    }

    model.ui.busy = true;
    Some(Cmd::batch(vec![Cmd::RedrawOverlay, Cmd::DeferSort { column }]))
}

fn run_sort(model: &mut AppModel, column: usize) -> Option<Cmd> {
    model.ui.busy = false;
    let Some(csv) = model.csv_mut() else {
        return Some(Cmd::RedrawOverlay);
    };
    csv.toggle_sort(column);
    let sort = csv.sort();
    tracing::debug!("Sorted column {:?} {:?}", sort.column, sort.direction);
    Some(Cmd::Redraw)
}

/// Copy a data cell addressed by its position in the filtered/sorted view
fn copy_cell(model: &mut AppModel, row: usize, column: usize, x: f64, y: f64) -> Option<Cmd> {
    let csv = model.csv()?;
    if column >= csv.column_count() {
        return None;
    }
    let Some(text) = csv.visible_cell(row, column) else {
        tracing::debug!("Copy request for row {} outside the view", row);
        return None;
    };
    Some(Cmd::CopyToClipboard {
        text: text.to_string(),
        x,
        y,
    })
}

fn copy_confirmed(model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
    let id = model.ui.show_tooltip(COPIED_TOOLTIP, x, y);
    Some(Cmd::batch(vec![
        Cmd::RedrawOverlay,
        Cmd::DismissTooltipAfter {
            id,
            delay: model.config.tooltip_duration(),
        },
    ]))
}

fn tooltip_expired(model: &mut AppModel, id: u64) -> Option<Cmd> {
    if model.ui.dismiss_tooltip(id) {
        Some(Cmd::RedrawOverlay)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use std::time::Duration;

    fn loaded(content: &str) -> AppModel {
        let mut model = AppModel::new(ViewerConfig::default(), Some("/tmp/t.csv".into()));
        model.ui.viewport_height = 300.0;
        model.finish_load(Ok(content.to_string()));
        model
    }

    fn first_column(model: &AppModel) -> Vec<String> {
        let csv = model.csv().unwrap();
        (0..csv.visible_row_count())
            .filter_map(|i| csv.visible_cell(i, 0))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_search_is_debounced_by_generation() {
        let mut model = loaded("name\nalpha\nbeta\ngamma");

        let first = update_csv(&mut model, CsvMsg::SearchInput { term: "a".into() });
        assert_eq!(
            first,
            Some(Cmd::ScheduleSearch {
                generation: 1,
                delay: Duration::from_millis(180)
            })
        );
        update_csv(&mut model, CsvMsg::SearchInput { term: "be".into() });

        // The superseded timer fires first and does nothing
        assert_eq!(update_csv(&mut model, CsvMsg::ApplySearch { generation: 1 }), None);
        assert_eq!(model.csv().unwrap().stats(), (3, 3));

        assert_eq!(
            update_csv(&mut model, CsvMsg::ApplySearch { generation: 2 }),
            Some(Cmd::Redraw)
        );
        assert_eq!(first_column(&model), vec!["beta"]);
    }

    #[test]
    fn test_clear_search_is_immediate() {
        let mut model = loaded("name\nalpha\nbeta");
        update_csv(&mut model, CsvMsg::SearchInput { term: "beta".into() });
        update_csv(&mut model, CsvMsg::ApplySearch { generation: 1 });
        assert_eq!(model.csv().unwrap().stats(), (1, 2));

        update_csv(&mut model, CsvMsg::ClearSearch);
        assert_eq!(model.csv().unwrap().stats(), (2, 2));
        assert_eq!(model.ui.search_input, "");
        // A timer started before the clear can't re-apply the old term
        assert_eq!(update_csv(&mut model, CsvMsg::ApplySearch { generation: 1 }), None);
    }

    #[test]
    fn test_sort_shows_busy_then_defers() {
        let mut model = loaded("n\n3\n10\n2");

        let cmd = update_csv(&mut model, CsvMsg::Sort { column: 0 });
        assert!(model.ui.busy);
        assert_eq!(
            cmd,
            Some(Cmd::batch(vec![Cmd::RedrawOverlay, Cmd::DeferSort { column: 0 }]))
        );
        // Nothing reordered yet
        assert_eq!(first_column(&model), vec!["3", "10", "2"]);

        assert_eq!(
            update_csv(&mut model, CsvMsg::RunSort { column: 0 }),
            Some(Cmd::Redraw)
        );
        assert!(!model.ui.busy);
        assert_eq!(first_column(&model), vec!["2", "3", "10"]);
    }

    #[test]
    fn test_sort_out_of_range_column_ignored() {
        let mut model = loaded("a,b\n1,2");
        assert_eq!(update_csv(&mut model, CsvMsg::Sort { column: 7 }), None);
        assert!(!model.ui.busy);
    }

    #[test]
    fn test_header_mode_updates_ui_and_table() {
        let mut model = loaded("h\nx");
        update_csv(&mut model, CsvMsg::SetHeaderMode(false));
        assert!(!model.ui.header_row);
        assert_eq!(first_column(&model), vec!["h", "x"]);
    }

    #[test]
    fn test_scroll_below_epsilon_skipped() {
        let mut model = loaded("n\n1\n2\n3");
        assert_eq!(
            update_csv(&mut model, CsvMsg::Scrolled { offset: 40.0 }),
            Some(Cmd::RedrawRows)
        );
        assert_eq!(update_csv(&mut model, CsvMsg::Scrolled { offset: 40.5 }), None);
        assert_eq!(
            update_csv(&mut model, CsvMsg::Scrolled { offset: 42.0 }),
            Some(Cmd::RedrawRows)
        );
    }

    #[test]
    fn test_row_measurement_fallback() {
        let mut model = loaded("n\n1");
        update_csv(&mut model, CsvMsg::RowMeasured { height: 0.0 });
        assert_eq!(model.csv().unwrap().viewport.row_height, 30.0);
        update_csv(&mut model, CsvMsg::RowMeasured { height: 22.0 });
        assert_eq!(model.csv().unwrap().viewport.row_height, 22.0);
    }

    #[test]
    fn test_copy_uses_view_position() {
        let mut model = loaded("n,v\nb,2\na,1");
        update_csv(&mut model, CsvMsg::RunSort { column: 0 });

        let cmd = update_csv(
            &mut model,
            CsvMsg::CopyCell {
                row: 0,
                column: 1,
                x: 5.0,
                y: 6.0,
            },
        );
        assert_eq!(
            cmd,
            Some(Cmd::CopyToClipboard {
                text: "1".into(),
                x: 5.0,
                y: 6.0
            })
        );
    }

    #[test]
    fn test_copy_outside_view_ignored() {
        let mut model = loaded("n\na");
        let cmd = update_csv(
            &mut model,
            CsvMsg::CopyCell {
                row: 4,
                column: 0,
                x: 0.0,
                y: 0.0,
            },
        );
        assert_eq!(cmd, None);
    }

    #[test]
    fn test_tooltip_lifecycle() {
        let mut model = loaded("n\na");
        let cmd = update_csv(&mut model, CsvMsg::CopyConfirmed { x: 1.0, y: 2.0 });
        let id = model.ui.tooltip.as_ref().map(|t| t.id).unwrap();
        assert_eq!(
            cmd,
            Some(Cmd::batch(vec![
                Cmd::RedrawOverlay,
                Cmd::DismissTooltipAfter {
                    id,
                    delay: Duration::from_millis(1200)
                }
            ]))
        );

        assert_eq!(
            update_csv(&mut model, CsvMsg::TooltipExpired { id }),
            Some(Cmd::RedrawOverlay)
        );
        assert_eq!(update_csv(&mut model, CsvMsg::TooltipExpired { id }), None);
    }

    #[test]
    fn test_messages_before_load_are_ignored() {
        let mut model = AppModel::new(ViewerConfig::default(), Some("/tmp/t.csv".into()));
        assert_eq!(update_csv(&mut model, CsvMsg::Sort { column: 0 }), None);
        assert_eq!(update_csv(&mut model, CsvMsg::Scrolled { offset: 9.0 }), None);
        assert_eq!(update_csv(&mut model, CsvMsg::SearchInput { term: "x".into() }), None);
        assert_eq!(model.ui.search_input, "x");
    }
}
