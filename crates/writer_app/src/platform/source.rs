use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use writer_core::Msg;
use writer_engine::DocumentSource;

use super::app::SharedState;

/// Statistics worker's view of the UI-owned document.
///
/// Reads go straight to the shared state; the dirty flag is written back as a
/// message so the state machine stays the only writer.
pub struct SharedDocument {
    shared: Arc<Mutex<SharedState>>,
    msg_tx: mpsc::Sender<Msg>,
}

impl SharedDocument {
    pub fn new(shared: Arc<Mutex<SharedState>>, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { shared, msg_tx }
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentSource for SharedDocument {
    fn plain_text(&self) -> String {
        self.lock().state.document().plain_text().to_string()
    }

    fn is_dirty(&self) -> bool {
        self.lock().state.document().is_dirty()
    }

    fn set_dirty(&self, dirty: bool) {
        let _ = self.msg_tx.send(Msg::DocumentDirtyChanged(dirty));
    }

    fn matches_baseline(&self, text: &str) -> bool {
        self.lock().state.document().matches_baseline(text)
    }
}
