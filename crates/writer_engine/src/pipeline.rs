use std::sync::{mpsc, Arc};

use writer_core::{compute_statistics, AdaptiveFactor, StatisticsOptions, StatisticsSnapshot};
use writer_logging::writer_debug;

use crate::debounce::{DebounceConfig, DebounceError, DebouncePhase, Debouncer, Trigger};

/// Read side of the document buffer as seen by the statistics worker.
pub trait DocumentSource: Send + Sync {
    fn plain_text(&self) -> String;
    fn is_dirty(&self) -> bool;
    fn set_dirty(&self, dirty: bool);
    /// Whether `text` equals the content at the last load or save.
    fn matches_baseline(&self, text: &str) -> bool;
}

pub trait StatisticsSink: Send + Sync {
    fn statistics_ready(&self, snapshot: StatisticsSnapshot);

    /// Called before `statistics_ready` when the document is empty.
    fn reset_formatting(&self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatisticsEvent {
    Ready(StatisticsSnapshot),
    ResetFormatting,
}

/// Forwards sink calls over a channel to whichever thread owns the UI state.
pub struct ChannelStatisticsSink {
    tx: mpsc::Sender<StatisticsEvent>,
}

impl ChannelStatisticsSink {
    pub fn new(tx: mpsc::Sender<StatisticsEvent>) -> Self {
        Self { tx }
    }
}

impl StatisticsSink for ChannelStatisticsSink {
    fn statistics_ready(&self, snapshot: StatisticsSnapshot) {
        let _ = self.tx.send(StatisticsEvent::Ready(snapshot));
    }

    fn reset_formatting(&self) {
        let _ = self.tx.send(StatisticsEvent::ResetFormatting);
    }
}

/// Snapshot the source text, derive statistics, refresh the dirty flag and
/// notify the sink.
pub fn recompute(
    source: &dyn DocumentSource,
    sink: &dyn StatisticsSink,
    options: &StatisticsOptions,
) -> StatisticsSnapshot {
    let text = source.plain_text();
    let snapshot = compute_statistics(&text, options);

    let dirty = !source.matches_baseline(&text);
    if source.is_dirty() != dirty {
        source.set_dirty(dirty);
    }

    if snapshot.is_empty() {
        sink.reset_formatting();
    }
    sink.statistics_ready(snapshot.clone());
    snapshot
}

/// Debounced statistics: edits in, snapshots out through the sink.
pub struct StatisticsPipeline {
    debouncer: Debouncer,
    trigger: Trigger,
}

impl StatisticsPipeline {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        sink: Arc<dyn StatisticsSink>,
        config: DebounceConfig,
        options: StatisticsOptions,
    ) -> Result<Self, DebounceError> {
        let trigger: Trigger = Arc::new(move || {
            let snapshot = recompute(source.as_ref(), sink.as_ref(), &options);
            writer_debug!(
                "statistics: {} chars, {} words, {} lines",
                snapshot.char_count,
                snapshot.word_count,
                snapshot.line_count
            );
        });
        let debouncer = Debouncer::new(config, Arc::clone(&trigger))?;
        Ok(Self { debouncer, trigger })
    }

    pub fn notify_edit(&self) {
        self.debouncer.notify_edit();
    }

    /// Recompute on the caller's thread, bypassing the debounce window.
    pub fn recompute_now(&self) {
        (self.trigger)();
    }

    pub fn set_adaptive_factor(&self, factor: AdaptiveFactor) {
        self.debouncer.set_adaptive_factor(factor);
    }

    pub fn phase(&self) -> DebouncePhase {
        self.debouncer.phase()
    }

    pub fn runs_completed(&self) -> u64 {
        self.debouncer.runs_completed()
    }

    pub fn shutdown(&self) {
        self.debouncer.shutdown();
    }
}
