//! Payload encoder: record + mode → the text embedded in the QR code.
//!
//! All functions here are pure and total. Blank values are omitted, and every
//! record maps to a renderable payload:
//!
//! - **phone contact**: a vCard 3.0 block, never without content lines
//! - **social media**: one bare URL, a newline-separated URL list, or the
//!   fallback URL
//! - **text message**: the phone number verbatim, optionally prefixed with a
//!   configured scheme
//!
//! # Usage
//!
//! ```rust
//! use gits_qr::encode::encode;
//! use gits_qr::model::{Mode, Record, ScalarField};
//!
//! let record = Record::new().set_field(ScalarField::FullName, "Jane Doe");
//! let card = encode(&record, Mode::PhoneContact);
//! assert!(card.contains("FN:Jane Doe"));
//! ```

pub mod profile;
pub mod social;
pub mod vcard;

pub use profile::{FieldProfile, ProfileKind};
pub use social::normalize_url;

use crate::model::{Mode, Record, present};

pub const DEFAULT_PLACEHOLDER_NAME: &str = "Contact";
pub const DEFAULT_FALLBACK_URL: &str = "https://example.com";

/// Knobs for [`encode_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub profile: ProfileKind,
    /// Formatted name of the placeholder card.
    pub placeholder_name: String,
    /// Social payload when no link is present.
    pub fallback_url: String,
    /// Prefix for the text-message payload (e.g. `sms:`). `None` emits the bare number.
    pub text_message_scheme: Option<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            profile: ProfileKind::default(),
            placeholder_name: DEFAULT_PLACEHOLDER_NAME.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            text_message_scheme: None,
        }
    }
}

/// Encode with default options.
pub fn encode(record: &Record, mode: Mode) -> String {
    encode_with(record, mode, &EncodeOptions::default())
}

pub fn encode_with(record: &Record, mode: Mode, options: &EncodeOptions) -> String {
    let profile = options.profile.profile();
    match mode {
        Mode::PhoneContact => vcard::encode_card(record, profile, &options.placeholder_name),
        Mode::SocialMedia => social::encode_links(record, profile, &options.fallback_url),
        Mode::TextMessage => text_target(record, options),
    }
}

/// Text-message payload: the phone number exactly as entered.
///
/// The configured scheme is only prepended to a non-blank number.
pub fn text_target(record: &Record, options: &EncodeOptions) -> String {
    match (&options.text_message_scheme, present(&record.phone_number)) {
        (Some(scheme), Some(_)) => format!("{scheme}{}", record.phone_number),
        _ => record.phone_number.clone(),
    }
}
