//! Coalescing debounce worker.
//!
//! A burst of [`Debouncer::notify_edit`] calls starts one coalescing timer.
//! When it expires the worker sleeps for the worker delay and then invokes
//! the trigger once. The phase moves `Idle -> Scheduled -> Running -> Idle`;
//! notifications outside `Idle` are dropped, so at most one run is in flight.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use writer_core::AdaptiveFactor;
use writer_logging::{writer_debug, writer_trace, writer_warn};

/// Base latency for both the coalescing timer and the worker sleep.
pub const BASE_INTERVAL: Duration = Duration::from_millis(150);

/// Callback fired once per debounce cycle.
pub type Trigger = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Error)]
pub enum DebounceError {
    #[error("failed to start debounce runtime: {0}")]
    Runtime(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub base_interval: Duration,
    pub adaptive_factor: AdaptiveFactor,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            base_interval: BASE_INTERVAL,
            adaptive_factor: AdaptiveFactor::NORMAL,
        }
    }
}

impl DebounceConfig {
    pub fn with_factor(adaptive_factor: AdaptiveFactor) -> Self {
        Self {
            adaptive_factor,
            ..Self::default()
        }
    }

    /// Quiet period between the first edit of a burst and the worker start.
    pub fn coalescing_interval(&self) -> Duration {
        self.base_interval * self.adaptive_factor.get()
    }

    /// Sleep performed by the worker before it fires the trigger.
    pub fn worker_delay(&self) -> Duration {
        self.base_interval * self.adaptive_factor.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    Idle,
    Scheduled,
    Running,
}

struct DebounceState {
    phase: DebouncePhase,
    config: DebounceConfig,
    shut_down: bool,
    runs_completed: u64,
}

struct Shared {
    state: Mutex<DebounceState>,
    trigger: Trigger,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, DebounceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn on_timer_expiry(self: Arc<Self>) {
        let delay = {
            let mut state = self.lock_state();
            if state.shut_down {
                state.phase = DebouncePhase::Idle;
                writer_debug!("debounce timer expired after shutdown; cycle dropped");
                return;
            }
            if state.phase == DebouncePhase::Running {
                return;
            }
            state.phase = DebouncePhase::Running;
            state.config.worker_delay()
        };

        let mut cycle = CycleGuard {
            shared: &self,
            completed: false,
        };
        self.run(delay).await;
        cycle.completed = true;
    }

    async fn run(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
        (self.trigger)();
    }
}

/// Returns the debouncer to `Idle` when a run ends, even if the trigger
/// panicked or the task was dropped mid-sleep.
struct CycleGuard<'a> {
    shared: &'a Shared,
    completed: bool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.lock_state();
        state.phase = DebouncePhase::Idle;
        if self.completed {
            state.runs_completed += 1;
            writer_trace!("debounce run {} complete", state.runs_completed);
        } else if std::thread::panicking() {
            writer_warn!("statistics trigger panicked; debouncer reset to idle");
        } else {
            writer_debug!("debounce run cancelled");
        }
    }
}

pub struct Debouncer {
    shared: Arc<Shared>,
    runtime: Option<Runtime>,
}

impl Debouncer {
    pub fn new(config: DebounceConfig, trigger: Trigger) -> Result<Self, DebounceError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("writer-debounce")
            .enable_time()
            .build()?;
        let shared = Arc::new(Shared {
            state: Mutex::new(DebounceState {
                phase: DebouncePhase::Idle,
                config,
                shut_down: false,
                runs_completed: 0,
            }),
            trigger,
        });
        Ok(Self {
            shared,
            runtime: Some(runtime),
        })
    }

    /// Record an edit. Starts the coalescing timer when idle; otherwise a no-op.
    pub fn notify_edit(&self) {
        let delay = {
            let mut state = self.shared.lock_state();
            if state.shut_down || state.phase != DebouncePhase::Idle {
                return;
            }
            state.phase = DebouncePhase::Scheduled;
            state.config.coalescing_interval()
        };

        let Some(runtime) = self.runtime.as_ref() else {
            self.shared.lock_state().phase = DebouncePhase::Idle;
            writer_debug!("debounce runtime gone; edit cycle dropped");
            return;
        };
        let shared = Arc::clone(&self.shared);
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.on_timer_expiry().await;
        });
    }

    /// Applies to cycles scheduled after this call.
    pub fn set_adaptive_factor(&self, factor: AdaptiveFactor) {
        let mut state = self.shared.lock_state();
        if state.config.adaptive_factor != factor {
            writer_debug!(
                "adaptive factor {} -> {}",
                state.config.adaptive_factor.get(),
                factor.get()
            );
            state.config.adaptive_factor = factor;
        }
    }

    pub fn config(&self) -> DebounceConfig {
        self.shared.lock_state().config
    }

    pub fn phase(&self) -> DebouncePhase {
        self.shared.lock_state().phase
    }

    pub fn runs_completed(&self) -> u64 {
        self.shared.lock_state().runs_completed
    }

    /// Stop scheduling; a timer already pending expires without running.
    pub fn shutdown(&self) {
        self.shared.lock_state().shut_down = true;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
