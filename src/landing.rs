//! Contact landing links.
//!
//! A landing link carries the contact subset of a record in its query string
//! so a scanner can open a page that saves the card and then jumps to the
//! LinkedIn profile:
//!
//! ```text
//! https://host/landing?data=<base64(percent-encoded JSON)>&linkedin=<url>
//! ```
//!
//! The card saved from a landing page uses the `landing` profile: the same
//! lines as a phone-contact card minus the LinkedIn URL, and no placeholder
//! name when everything is blank.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::display::slug::{is_valid_filename, slugify};
use crate::encode::profile::LANDING;
use crate::encode::{DEFAULT_PLACEHOLDER_NAME, normalize_url, vcard};
use crate::model::{ListField, MAX_LIST_LEN, Record, RecordError, ScalarField, present};

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("invalid landing URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("landing URL has no data parameter")]
    MissingData,

    #[error("data parameter is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("data parameter is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("data parameter is not a contact: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Contact subset carried by the `data` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingContact {
    pub full_name: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub emails: Vec<String>,
    pub addresses: Vec<String>,
    pub websites: Vec<String>,
}

impl LandingContact {
    pub fn from_record(record: &Record) -> Self {
        Self {
            full_name: record.full_name.clone(),
            phone_number: record.phone_number.clone(),
            whatsapp_number: record.whatsapp_number.clone(),
            emails: record.list(ListField::Emails).to_vec(),
            addresses: record.list(ListField::Addresses).to_vec(),
            websites: record.list(ListField::Websites).to_vec(),
        }
    }

    /// Rebuild a record through the regular list operations.
    pub fn into_record(self) -> Result<Record, RecordError> {
        let mut record = Record::new()
            .set_field(ScalarField::FullName, self.full_name)
            .set_field(ScalarField::PhoneNumber, self.phone_number)
            .set_field(ScalarField::WhatsappNumber, self.whatsapp_number);

        for (list, items) in [
            (ListField::Emails, self.emails),
            (ListField::Addresses, self.addresses),
            (ListField::Websites, self.websites),
        ] {
            if items.len() > MAX_LIST_LEN {
                return Err(RecordError::ListTooLong {
                    len: items.len(),
                    max: MAX_LIST_LEN,
                });
            }
            for (index, item) in items.into_iter().enumerate() {
                if index > 0 {
                    record = record.append_list_item(list);
                }
                record = record.set_list_item(list, index, item)?;
            }
        }

        Ok(record)
    }
}

/// Decoded landing link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPayload {
    pub record: Record,
    /// LinkedIn profile to open after saving, with an `https://` scheme ensured.
    pub linked_in: Option<String>,
}

impl LandingPayload {
    /// Card to save on the scanning device.
    pub fn vcard(&self) -> String {
        vcard::encode_card(&self.record, &LANDING, DEFAULT_PLACEHOLDER_NAME)
    }

    /// `<full name>.vcf`, or `contact.vcf` without a name.
    pub fn vcf_filename(&self) -> String {
        let name = match present(&self.record.full_name) {
            Some(name) if is_valid_filename(&format!("{name}.vcf")) => name.to_string(),
            Some(name) => slugify(name),
            None => String::new(),
        };
        if name.is_empty() {
            "contact.vcf".to_string()
        } else {
            format!("{name}.vcf")
        }
    }
}

/// A landing page URL carrying a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingLink {
    url: Url,
}

impl LandingLink {
    /// Build a landing link for `record` under `base`.
    pub fn build(base: &str, record: &Record) -> Result<Self, LandingError> {
        Ok(Self {
            url: build_landing_url(base, record)?,
        })
    }

    /// Decode a landing link back into a record and LinkedIn target.
    pub fn parse(raw: &str) -> Result<LandingPayload, LandingError> {
        parse_landing_url(raw)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for LandingLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn build_landing_url(base: &str, record: &Record) -> Result<Url, LandingError> {
    let mut url = Url::parse(base)?;
    let json = serde_json::to_string(&LandingContact::from_record(record))?;
    let data = STANDARD.encode(urlencoding::encode(&json).as_bytes());

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("data", &data);
        if let Some(linked_in) = record.linked_in_url() {
            query.append_pair("linkedin", linked_in);
        }
    }

    debug!(len = url.as_str().len(), "built landing url");
    Ok(url)
}

fn parse_landing_url(raw: &str) -> Result<LandingPayload, LandingError> {
    let url = Url::parse(raw.trim())?;

    let mut data = None;
    let mut linked_in = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "data" => data = Some(value.into_owned()),
            "linkedin" => linked_in = Some(value.into_owned()),
            _ => {}
        }
    }

    let data = data.ok_or(LandingError::MissingData)?;
    let decoded = String::from_utf8(STANDARD.decode(data.as_bytes())?)?;
    let json = urlencoding::decode(&decoded)?;
    let contact: LandingContact = serde_json::from_str(&json)?;

    Ok(LandingPayload {
        record: contact.into_record()?,
        linked_in: linked_in.as_deref().and_then(present).map(normalize_url),
    })
}
