//! Runs the update loop against a surface, clipboard and text source
//!
//! The driver owns the model and performs every [`Cmd`] side effect. Delayed
//! messages go through the [`Scheduler`]; the host event loop calls
//! [`Driver::tick`] when [`Driver::next_deadline`] passes. Everything here is
//! single-threaded: a message and all its commands finish before the next
//! message is taken.

use std::time::{Duration, Instant};

use crate::clipboard::ClipboardSink;
use crate::commands::Cmd;
use crate::loader::TextSource;
use crate::messages::{AppMsg, CsvMsg, Msg};
use crate::model::AppModel;
use crate::scheduler::Scheduler;
use crate::surface::{DisplaySurface, Frame};
use crate::update::update;
use crate::view;

/// Delay before a deferred sort runs, so the busy indicator gets a frame
pub const SORT_YIELD: Duration = Duration::from_millis(16);

pub struct Driver<S, C, T> {
    model: AppModel,
    surface: S,
    clipboard: C,
    source: T,
    scheduler: Scheduler,
}

impl<S, C, T> Driver<S, C, T>
where
    S: DisplaySurface,
    C: ClipboardSink,
    T: TextSource,
{
    pub fn new(model: AppModel, surface: S, clipboard: C, source: T) -> Self {
        Self {
            model,
            surface,
            clipboard,
            source,
            scheduler: Scheduler::new(),
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Run one message through update and perform the resulting commands
    pub fn dispatch(&mut self, msg: impl Into<Msg>, now: Instant) {
        if let Some(cmd) = update(&mut self.model, msg.into()) {
            self.process_cmd(cmd, now);
        }
    }

    /// Deliver every timer due at `now`; returns how many fired
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        let fired = due.len();
        for msg in due {
            self.dispatch(msg, now);
        }
        fired
    }

    /// When the host should call [`Driver::tick`] next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn apply(&mut self, frame: Frame) {
        if !frame.is_empty() {
            self.surface.apply(&frame);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd, now: Instant) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.apply(view::full_frame(&self.model)),
            Cmd::RedrawRows => self.apply(view::rows_frame(&self.model)),
            Cmd::RedrawOverlay => self.apply(view::overlay_frame(&self.model)),
            Cmd::MeasureRow => self.apply(view::measure_frame(&self.model)),
            Cmd::SyncControls => self.apply(view::controls_frame(&self.model)),
            Cmd::ScheduleSearch { generation, delay } => {
                self.scheduler
                    .schedule(now + delay, CsvMsg::ApplySearch { generation });
            }
            Cmd::DeferSort { column } => {
                self.scheduler
                    .schedule(now + SORT_YIELD, CsvMsg::RunSort { column });
            }
            Cmd::CopyToClipboard { text, x, y } => match self.clipboard.set_text(&text) {
                Ok(()) => {
                    tracing::debug!("Copied {} bytes to clipboard", text.len());
                    self.dispatch(CsvMsg::CopyConfirmed { x, y }, now);
                }
                Err(e) => tracing::error!("Failed to copy to clipboard: {}", e),
            },
            Cmd::DismissTooltipAfter { id, delay } => {
                self.scheduler
                    .schedule(now + delay, CsvMsg::TooltipExpired { id });
            }
            Cmd::FetchFile { url } => {
                let result = self.source.fetch_text(&url);
                self.dispatch(AppMsg::FileFetched { result }, now);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, now);
                }
            }
        }
    }
}
