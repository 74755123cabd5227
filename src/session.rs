//! Form session: owner of the latest record snapshot.
//!
//! Edits go through the pure record operations and replace the snapshot
//! wholesale. Views are re-derived from the snapshot on every call.

use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::display::{self, NamingOptions};
use crate::encode::{self, EncodeOptions};
use crate::model::{ListField, Mode, Record, RecordError, ScalarField};

/// A single form event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SetField(ScalarField, String),
    SetListItem(ListField, usize, String),
    AppendListItem(ListField),
    RemoveListItem(ListField, usize),
    SetMode(Mode),
}

/// Everything the presentation layer needs for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrView {
    pub mode: Mode,
    pub payload: String,
    pub label: String,
    pub filename: String,
    /// Platform names shown above a social code; empty in other modes.
    pub tags: Vec<&'static str>,
    /// False when the form should show a "fill the form" prompt instead of a code.
    pub has_content: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    record: Record,
    encode_options: EncodeOptions,
    naming_options: NamingOptions,
}

impl FormSession {
    pub fn new(record: Record, encode_options: EncodeOptions, naming_options: NamingOptions) -> Self {
        Self {
            record,
            encode_options,
            naming_options,
        }
    }

    pub fn from_config(record: Record, config: &AppConfig) -> Self {
        Self::new(record, config.encode_options(), config.naming_options())
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// Apply one edit. On error the previous snapshot stays in place.
    pub fn apply(&mut self, edit: Edit) -> Result<&Record, RecordError> {
        let current = self.record.clone();
        let next = match edit {
            Edit::SetField(field, value) => current.set_field(field, value),
            Edit::SetListItem(list, index, value) => current.set_list_item(list, index, value)?,
            Edit::AppendListItem(list) => current.append_list_item(list),
            Edit::RemoveListItem(list, index) => current.remove_list_item(list, index)?,
            Edit::SetMode(mode) => current.with_mode(mode),
        };
        debug!(mode = %next.mode, "record snapshot replaced");
        self.record = next;
        Ok(&self.record)
    }

    /// Derive payload and metadata for the record's current mode.
    pub fn view(&self) -> QrView {
        self.view_as(self.record.mode)
    }

    pub fn view_as(&self, mode: Mode) -> QrView {
        let record = &self.record;
        let tags = if mode == Mode::SocialMedia {
            display::platform_tags(record, self.naming_options.profile)
        } else {
            Vec::new()
        };
        QrView {
            mode,
            payload: encode::encode_with(record, mode, &self.encode_options),
            label: display::label_with(record, mode, &self.naming_options),
            filename: display::filename_with(record, mode, &self.naming_options),
            tags,
            has_content: record.has_content(mode),
        }
    }
}
