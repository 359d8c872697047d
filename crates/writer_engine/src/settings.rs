//! Persisted application settings.
//!
//! Settings are loaded once at startup and flushed explicitly whenever the
//! session changes, instead of being read and written ad hoc.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use writer_core::{AdaptiveFactor, Session, Theme};
use writer_logging::{writer_info, writer_warn};

use crate::persist::{AtomicFileWriter, PersistError};

pub const SETTINGS_FILENAME: &str = "settings.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    #[default]
    Light,
    Dark,
}

impl From<Theme> for ThemeSetting {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemeSetting::Light,
            Theme::Dark => ThemeSetting::Dark,
        }
    }
}

impl From<ThemeSetting> for Theme {
    fn from(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Light => Theme::Light,
            ThemeSetting::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub adaptive_response: u32,
    pub file_name: Option<PathBuf>,
    pub default_directory: Option<PathBuf>,
    pub app_theme: ThemeSetting,
    pub app_language: String,
    pub is_saved: bool,
    /// Plain text of the buffer when the settings were last flushed.
    pub content: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            adaptive_response: 1,
            file_name: None,
            default_directory: None,
            app_theme: ThemeSetting::Light,
            app_language: "en".to_string(),
            is_saved: true,
            content: None,
        }
    }
}

impl AppSettings {
    pub fn adaptive_factor(&self) -> AdaptiveFactor {
        AdaptiveFactor::new(self.adaptive_response)
    }

    pub fn session(&self) -> Session {
        Session {
            adaptive_factor: self.adaptive_factor(),
            theme: self.app_theme.into(),
            file: self.file_name.clone(),
            is_saved: self.is_saved,
            content: self.content.clone(),
        }
    }

    /// Fold a session into the settings, remembering the file's directory.
    pub fn apply_session(&mut self, session: &Session) {
        self.adaptive_response = session.adaptive_factor.get();
        self.app_theme = session.theme.into();
        self.is_saved = session.is_saved;
        self.content = session.content.clone();
        if let Some(dir) = session.file.as_deref().and_then(Path::parent) {
            if !dir.as_os_str().is_empty() {
                self.default_directory = Some(dir.to_path_buf());
            }
        }
        self.file_name = session.file.clone();
    }

    fn normalized(mut self) -> Self {
        self.adaptive_response = self.adaptive_response.max(1);
        self
    }
}

pub trait SettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError>;
    fn flush(&self, settings: &AppSettings) -> Result<(), SettingsError>;
}

/// Settings kept as `settings.ron` inside a directory.
#[derive(Debug, Clone)]
pub struct RonSettingsStore {
    dir: PathBuf,
}

impl RonSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILENAME)
    }
}

impl SettingsStore for RonSettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(AppSettings::default());
            }
            Err(err) => return Err(err.into()),
        };
        let settings: AppSettings = ron::from_str(&content)?;
        writer_info!("Loaded settings from {:?}", path);
        Ok(settings.normalized())
    }

    fn flush(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(settings, pretty)?;
        AtomicFileWriter::new(&self.dir).write(SETTINGS_FILENAME, content)?;
        Ok(())
    }
}

/// Load settings, falling back to defaults when the store is unreadable.
pub fn load_or_default(store: &dyn SettingsStore) -> AppSettings {
    match store.load() {
        Ok(settings) => settings,
        Err(err) => {
            writer_warn!("Failed to load settings, using defaults: {}", err);
            AppSettings::default()
        }
    }
}
