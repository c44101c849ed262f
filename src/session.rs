use std::{path::Path, sync::Arc};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::{
    CalendarDate, ClockLabels, ConfigError, CycleConfig, CycleLabels, ImportError, MonthLayout,
    ParseError, SettingsStore, StoreError, ViewState,
};

/// Error type for changing the session's configuration.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Labels of a single day, as shown in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub date:   CalendarDate,
    pub labels: CycleLabels,
}

/// The single owner of the current label configuration and view.
///
/// The configuration is held as an immutable shared snapshot. Every change
/// builds a new snapshot and swaps it in whole, so a snapshot handed out by
/// [`Session::config`] never changes under its holder.
#[derive(Debug, Clone)]
pub struct Session {
    config: Arc<CycleConfig>,
    view:   ViewState,
    store:  Option<SettingsStore>,
}

impl Session {
    /// A session without persistence.
    pub fn new(config: CycleConfig, view: ViewState) -> Self {
        Self {
            config: Arc::new(config),
            view,
            store: None,
        }
    }

    /// A session whose configuration is loaded from, and saved to, `store`.
    pub fn open(store: SettingsStore, view: ViewState) -> Self {
        Self {
            config: Arc::new(store.load()),
            view,
            store: Some(store),
        }
    }

    /// The current configuration snapshot.
    pub fn config(&self) -> Arc<CycleConfig> {
        Arc::clone(&self.config)
    }

    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Replaces one label.
    ///
    /// # Errors
    /// Returns `SessionError::Config` for an unknown period or index and
    /// `SessionError::Store` if the result cannot be saved.
    pub fn set_label(&mut self, period: usize, index: usize, text: &str) -> Result<Arc<CycleConfig>, SessionError> {
        let next = self.config.with_label(period, index, text)?;
        self.commit(next)
    }

    /// Restores the built-in labels.
    ///
    /// # Errors
    /// Returns `SessionError::Store` if the defaults cannot be saved.
    pub fn reset_config(&mut self) -> Result<Arc<CycleConfig>, SessionError> {
        self.commit(CycleConfig::defaults())
    }

    /// Replaces the configuration with an imported payload.
    /// On any error the current configuration stays in place.
    ///
    /// # Errors
    /// Returns `SessionError::Import` if `text` is not a label mapping.
    pub fn import_text(&mut self, text: &str) -> Result<Arc<CycleConfig>, SessionError> {
        let next = CycleConfig::import(text, &CycleConfig::defaults())?;
        self.commit(next)
    }

    /// Like [`Session::import_text`], reading the payload from `path`.
    ///
    /// # Errors
    /// Returns `SessionError::Store` if the file cannot be read or parsed.
    pub fn import_file(&mut self, path: &Path) -> Result<Arc<CycleConfig>, SessionError> {
        let next = SettingsStore::read_import(path)?;
        self.commit(next)
    }

    /// Replaces the configuration wholesale.
    ///
    /// # Errors
    /// Returns `SessionError::Store` if the configuration cannot be saved.
    pub fn replace_config(&mut self, config: CycleConfig) -> Result<Arc<CycleConfig>, SessionError> {
        self.commit(config)
    }

    /// Saves first, then swaps; a failed save changes nothing.
    fn commit(&mut self, next: CycleConfig) -> Result<Arc<CycleConfig>, SessionError> {
        if let Some(store) = &self.store {
            store.save(&next)?;
        }
        self.config = Arc::new(next);
        info!("label configuration updated");
        Ok(self.config())
    }

    /// Lays out the viewed month with the current configuration.
    pub fn render(&mut self) -> MonthLayout {
        let config = Arc::clone(&self.config);
        self.view.render(&config)
    }

    pub fn day_detail(&self, date: CalendarDate) -> DayDetail {
        DayDetail {
            date,
            labels: CycleLabels::for_date(&date, &self.config),
        }
    }

    /// Clock labels for `now`.
    ///
    /// # Errors
    /// Returns `ParseError` if `now` is outside the supported year range.
    pub fn clock(&self, now: NaiveDateTime) -> Result<ClockLabels, ParseError> {
        ClockLabels::at(now, &self.config)
    }
}
