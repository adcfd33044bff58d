//! App message handlers (page startup, file loading)

use crate::commands::Cmd;
use crate::loader::LoadError;
use crate::messages::AppMsg;
use crate::model::{AppModel, LoadState};

/// Handle app messages (page startup, file loading)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::PageReady { viewport_height } => {
            model.ui.viewport_height = viewport_height;

            // A reloaded page needs everything again, but the file is only
            // ever fetched once
            if !matches!(model.load, LoadState::Loading) {
                if let Some(csv) = model.csv_mut() {
                    csv.viewport.resize(viewport_height);
                }
                return Some(Cmd::batch(vec![
                    Cmd::Redraw,
                    Cmd::MeasureRow,
                    Cmd::SyncControls,
                ]));
            }

            match model.file_url.clone() {
                Some(url) => {
                    tracing::info!("Fetching {}", url);
                    Some(Cmd::batch(vec![Cmd::Redraw, Cmd::FetchFile { url }]))
                }
                None => {
                    model.finish_load(Err(LoadError::MissingUrl));
                    Some(Cmd::Redraw)
                }
            }
        }

        AppMsg::FileFetched { result } => {
            model.finish_load(result);
            if model.load.is_ready() {
                Some(Cmd::batch(vec![
                    Cmd::Redraw,
                    Cmd::MeasureRow,
                    Cmd::SyncControls,
                ]))
            } else {
                Some(Cmd::Redraw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;

    #[test]
    fn test_page_ready_without_url_fails() {
        let mut model = AppModel::new(ViewerConfig::default(), None);
        let cmd = update_app(
            &mut model,
            AppMsg::PageReady {
                viewport_height: 500.0,
            },
        );
        assert_eq!(cmd, Some(Cmd::Redraw));
        assert!(matches!(model.load, LoadState::Failed(_)));
    }

    #[test]
    fn test_page_ready_fetches_once() {
        let mut model = AppModel::new(ViewerConfig::default(), Some("/tmp/x.csv".into()));
        let cmd = update_app(
            &mut model,
            AppMsg::PageReady {
                viewport_height: 500.0,
            },
        );
        assert_eq!(
            cmd,
            Some(Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::FetchFile {
                    url: "/tmp/x.csv".into()
                }
            ]))
        );

        update_app(
            &mut model,
            AppMsg::FileFetched {
                result: Ok("a\n1".into()),
            },
        );
        let again = update_app(
            &mut model,
            AppMsg::PageReady {
                viewport_height: 300.0,
            },
        );
        assert!(!matches!(again, Some(Cmd::Batch(ref cmds)) if cmds.iter().any(|c| matches!(c, Cmd::FetchFile { .. }))));
        assert_eq!(model.csv().map(|c| c.viewport.viewport_height), Some(300.0));
    }

    #[test]
    fn test_fetch_error_is_terminal_panel() {
        let mut model = AppModel::new(ViewerConfig::default(), Some("/nope.csv".into()));
        let cmd = update_app(
            &mut model,
            AppMsg::FileFetched {
                result: Err(LoadError::NotFound("/nope.csv".into())),
            },
        );
        assert_eq!(cmd, Some(Cmd::Redraw));
        assert!(matches!(model.load, LoadState::Failed(ref m) if m.contains("/nope.csv")));
    }
}
