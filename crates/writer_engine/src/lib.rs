//! Writer engine: debounced statistics, document IO and settings persistence.
mod convert;
mod debounce;
mod decode;
mod docx;
mod document;
mod persist;
mod pipeline;
mod settings;

pub use convert::{
    html_to_plain_text, markdown_to_html, plain_text_to_html, Converter, Html2MdConverter,
};
pub use debounce::{DebounceConfig, DebounceError, DebouncePhase, Debouncer, Trigger, BASE_INTERVAL};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use docx::{docx_to_plain_text, DocxError};
pub use document::{load_document, save_document, DocumentIoError, LoadedDocument};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    recompute, ChannelStatisticsSink, DocumentSource, StatisticsEvent, StatisticsPipeline,
    StatisticsSink,
};
pub use settings::{
    load_or_default, AppSettings, RonSettingsStore, SettingsError, SettingsStore, ThemeSetting,
    SETTINGS_FILENAME,
};
