use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use writer_core::{DocumentFormat, Effect, Msg, StatisticsOptions};
use writer_engine::{
    load_document, save_document, AppSettings, ChannelStatisticsSink, DebounceConfig,
    DocumentSource, RonSettingsStore, SettingsStore, StatisticsEvent, StatisticsPipeline,
};
use writer_logging::{writer_error, writer_info, writer_warn};

/// Carries out effects produced by `update`, feeding results back as messages.
pub struct EffectRunner {
    pipeline: StatisticsPipeline,
    store: RonSettingsStore,
    settings: AppSettings,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        store: RonSettingsStore,
        settings: AppSettings,
        msg_tx: mpsc::Sender<Msg>,
    ) -> anyhow::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = StatisticsPipeline::new(
            source,
            Arc::new(ChannelStatisticsSink::new(event_tx)),
            DebounceConfig::with_factor(settings.adaptive_factor()),
            StatisticsOptions::default(),
        )?;
        spawn_event_loop(event_rx, msg_tx.clone());
        Ok(Self {
            pipeline,
            store,
            settings,
            msg_tx,
        })
    }

    /// Run effects in order; `Break` once the application should exit.
    pub fn run(&mut self, effects: Vec<Effect>) -> ControlFlow<()> {
        for effect in effects {
            match effect {
                Effect::NotifyEdit => self.pipeline.notify_edit(),
                Effect::RefreshStatistics => self.pipeline.recompute_now(),
                Effect::LoadDocument { path } => self.load(path),
                Effect::SaveDocument {
                    path,
                    format,
                    plain_text,
                    html,
                } => self.save(path, format, &plain_text, html.as_deref()),
                Effect::RequestSavePath => {
                    writer_info!("save requested without a file name; waiting for :saveas");
                }
                Effect::SetAdaptiveFactor(factor) => {
                    writer_info!("adaptive factor set to {}", factor.get());
                    self.pipeline.set_adaptive_factor(factor);
                }
                Effect::PersistSettings(session) => {
                    self.settings.apply_session(&session);
                    if let Err(err) = self.store.flush(&self.settings) {
                        writer_error!("Failed to persist settings to {:?}: {}", self.store.path(), err);
                    }
                }
                Effect::Quit => {
                    self.pipeline.shutdown();
                    return ControlFlow::Break(());
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn load(&self, path: PathBuf) {
        let msg = match load_document(&path) {
            Ok(loaded) => {
                writer_info!(
                    "opened {:?} ({:?}, {})",
                    loaded.path,
                    loaded.format,
                    loaded.encoding_label
                );
                Msg::DocumentLoaded {
                    path: loaded.path,
                    format: loaded.format,
                    plain_text: loaded.plain_text,
                    html: loaded.html,
                }
            }
            Err(err) => {
                writer_warn!("Failed to open {:?}: {}", path, err);
                Msg::LoadFailed {
                    path,
                    reason: err.to_string(),
                }
            }
        };
        let _ = self.msg_tx.send(msg);
    }

    fn save(&self, path: PathBuf, format: DocumentFormat, plain_text: &str, html: Option<&str>) {
        let msg = match save_document(&path, format, plain_text, html) {
            Ok(_) => Msg::DocumentSaved { path },
            Err(err) => {
                writer_warn!("Failed to save {:?}: {}", path, err);
                Msg::SaveFailed {
                    path,
                    reason: err.to_string(),
                }
            }
        };
        let _ = self.msg_tx.send(msg);
    }
}

/// Forward statistics events to the UI thread until the pipeline goes away.
fn spawn_event_loop(event_rx: mpsc::Receiver<StatisticsEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for event in event_rx {
            let msg = match event {
                StatisticsEvent::Ready(snapshot) => Msg::StatisticsReady(snapshot),
                StatisticsEvent::ResetFormatting => Msg::ResetFormatting,
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;
    use std::sync::{mpsc, Arc, Mutex};
    use std::time::Duration;

    use tempfile::TempDir;
    use writer_core::{AdaptiveFactor, DocumentFormat, Effect, Msg, Session, Theme};
    use writer_engine::{AppSettings, RonSettingsStore, SettingsStore};

    use super::EffectRunner;
    use crate::platform::app::SharedState;
    use crate::platform::source::SharedDocument;

    fn runner(dir: &TempDir) -> (EffectRunner, mpsc::Receiver<Msg>) {
        let (tx, rx) = mpsc::channel();
        let shared = Arc::new(Mutex::new(SharedState::default()));
        let source = Arc::new(SharedDocument::new(shared, tx.clone()));
        let store = RonSettingsStore::new(dir.path());
        let runner = EffectRunner::new(source, store, AppSettings::default(), tx).unwrap();
        (runner, rx)
    }

    #[test]
    fn save_then_load_reports_back() {
        let dir = TempDir::new().unwrap();
        let (mut runner, rx) = runner(&dir);
        let path = dir.path().join("note.txt");

        let flow = runner.run(vec![Effect::SaveDocument {
            path: path.clone(),
            format: DocumentFormat::PlainText,
            plain_text: "hi".into(),
            html: None,
        }]);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(rx.try_recv().unwrap(), Msg::DocumentSaved { path: path.clone() });

        runner.run(vec![Effect::LoadDocument { path: path.clone() }]);
        assert_eq!(
            rx.try_recv().unwrap(),
            Msg::DocumentLoaded {
                path,
                format: DocumentFormat::PlainText,
                plain_text: "hi".into(),
                html: None,
            }
        );
    }

    #[test]
    fn failed_load_becomes_message() {
        let dir = TempDir::new().unwrap();
        let (mut runner, rx) = runner(&dir);
        let path = dir.path().join("missing.txt");

        runner.run(vec![Effect::LoadDocument { path: path.clone() }]);
        assert!(matches!(rx.try_recv().unwrap(), Msg::LoadFailed { path: p, .. } if p == path));
    }

    #[test]
    fn persist_writes_settings_file() {
        let dir = TempDir::new().unwrap();
        let (mut runner, _rx) = runner(&dir);
        let session = Session {
            adaptive_factor: AdaptiveFactor::new(4),
            theme: Theme::Dark,
            file: None,
            is_saved: false,
            content: Some("unsaved words".into()),
        };

        runner.run(vec![Effect::PersistSettings(session.clone())]);

        let loaded = RonSettingsStore::new(dir.path()).load().unwrap();
        assert_eq!(loaded.session(), session);
    }

    #[test]
    fn edits_produce_statistics_messages() {
        let dir = TempDir::new().unwrap();
        let (mut runner, rx) = runner(&dir);

        runner.run(vec![Effect::NotifyEdit]);

        // Empty document: formatting reset precedes the snapshot.
        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, Msg::ResetFormatting);
        let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(second, Msg::StatisticsReady(snapshot) if snapshot.char_count == 0));
    }

    #[test]
    fn refresh_reports_statistics_without_a_debounce_cycle() {
        let dir = TempDir::new().unwrap();
        let (mut runner, rx) = runner(&dir);

        runner.run(vec![Effect::RefreshStatistics]);

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, Msg::ResetFormatting);
        let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(second, Msg::StatisticsReady(_)));
        assert_eq!(runner.pipeline.runs_completed(), 0);
    }

    #[test]
    fn quit_breaks_the_loop() {
        let dir = TempDir::new().unwrap();
        let (mut runner, _rx) = runner(&dir);
        assert_eq!(runner.run(vec![Effect::Quit]), ControlFlow::Break(()));
    }
}
