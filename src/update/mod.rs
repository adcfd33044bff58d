//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod csv;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use csv::update_csv;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::App(m) => app::update_app(model, m),
        Msg::Csv(m) => csv::update_csv(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Filters out noisy messages like scroll events from logging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::CsvMsg;

    let is_noisy = matches!(&msg, Msg::Csv(CsvMsg::Scrolled { .. }));
    if is_noisy {
        return update_inner(model, msg);
    }

    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);
    if let Some(ref cmd) = result {
        debug!(target: "message", ?cmd, "produced");
    }
    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments, except for
/// fetched file contents which are summarized.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::AppMsg;

    match msg {
        Msg::App(AppMsg::FileFetched { result: Ok(text) }) => {
            format!("App::FileFetched(Ok({} bytes))", text.len())
        }
        Msg::App(m) => format!("App::{:?}", m),
        Msg::Csv(m) => format!("Csv::{:?}", m),
    }
}
