//! Writer core: pure document state machine, statistics and view-model helpers.
mod document;
mod effect;
mod format;
mod msg;
mod power;
mod state;
mod statistics;
mod update;
mod view_model;

pub use document::{Document, DocumentFormat};
pub use effect::Effect;
pub use format::{Alignment, FormatChange, TextFormat};
pub use msg::{Msg, Session};
pub use power::{power_saver_factor, AdaptiveFactor, BatteryStatus, LOW_BATTERY_PERCENT};
pub use state::{AppState, Theme};
pub use statistics::{
    compute_statistics, StatisticsOptions, StatisticsSnapshot, DEFAULT_LANGUAGE_THRESHOLD,
};
pub use update::update;
pub use view_model::{DocumentViewModel, APP_DISPLAY_NAME};
