//! The personal-info record and its field-scoped update operations.
//!
//! Every update consumes the record and hands back the next snapshot, so a
//! caller never observes a half-applied edit. Repeatable lists always hold
//! between one and [`MAX_LIST_LEN`] entries; blank entries are kept as slots
//! and only dropped at encoding time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{ListField, Mode, ScalarField, present, present_opt};

/// Upper bound for every repeatable list.
pub const MAX_LIST_LEN: usize = 10;

/// Errors surfaced by direct record manipulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("index {index} is out of range for {list} (length {len})")]
    IndexOutOfRange {
        list: ListField,
        index: usize,
        len: usize,
    },

    #[error("a repeatable list holds at most {max} entries, got {len}")]
    ListTooLong { len: usize, max: usize },
}

/// Ordered list of 1..=10 string slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RepeatableList(Vec<String>);

impl RepeatableList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-blank entries in list order.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|v| present(v))
    }
}

impl Default for RepeatableList {
    fn default() -> Self {
        Self(vec![String::new()])
    }
}

impl TryFrom<Vec<String>> for RepeatableList {
    type Error = RecordError;

    fn try_from(mut items: Vec<String>) -> Result<Self, Self::Error> {
        if items.len() > MAX_LIST_LEN {
            return Err(RecordError::ListTooLong {
                len: items.len(),
                max: MAX_LIST_LEN,
            });
        }
        if items.is_empty() {
            items.push(String::new());
        }
        Ok(Self(items))
    }
}

impl From<RepeatableList> for Vec<String> {
    fn from(list: RepeatableList) -> Self {
        list.0
    }
}

/// Fields only the fixed-label form carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bangladesh_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usa_address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usa_address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lisu_foundation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub madrasha_orphanage: Option<String>,
}

/// A partially filled personal-info record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub full_name: String,
    pub phone_number: String,
    pub whatsapp_number: String,
    emails: RepeatableList,
    addresses: RepeatableList,
    websites: RepeatableList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(flatten)]
    pub fixed: FixedFields,
    pub mode: Mode,
}

impl Record {
    /// Empty record: blank scalars, one blank slot per list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a scalar field. Absent optional fields read as `None`.
    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        match field {
            ScalarField::FullName => Some(&self.full_name),
            ScalarField::PhoneNumber => Some(&self.phone_number),
            ScalarField::WhatsappNumber => Some(&self.whatsapp_number),
            ScalarField::LinkedIn => self.linked_in.as_deref(),
            ScalarField::Facebook => self.facebook.as_deref(),
            ScalarField::Instagram => self.instagram.as_deref(),
            ScalarField::Twitter => self.twitter.as_deref(),
            ScalarField::PersonalEmail => self.fixed.personal_email.as_deref(),
            ScalarField::JobEmail => self.fixed.job_email.as_deref(),
            ScalarField::WorkEmail => self.fixed.work_email.as_deref(),
            ScalarField::BangladeshAddress => self.fixed.bangladesh_address.as_deref(),
            ScalarField::UsaAddress1 => self.fixed.usa_address1.as_deref(),
            ScalarField::UsaAddress2 => self.fixed.usa_address2.as_deref(),
            ScalarField::TrainingWebsite => self.fixed.training_website.as_deref(),
            ScalarField::EducationalWebsite => self.fixed.educational_website.as_deref(),
            ScalarField::PortfolioWebsite => self.fixed.portfolio_website.as_deref(),
            ScalarField::LisuFoundation => self.fixed.lisu_foundation.as_deref(),
            ScalarField::MadrashaOrphanage => self.fixed.madrasha_orphanage.as_deref(),
        }
    }

    /// Trimmed value of a scalar field, `None` when blank or absent.
    pub fn present_scalar(&self, field: ScalarField) -> Option<&str> {
        self.scalar(field).and_then(present)
    }

    pub fn list(&self, list: ListField) -> &[String] {
        self.repeatable(list).as_slice()
    }

    pub fn repeatable(&self, list: ListField) -> &RepeatableList {
        match list {
            ListField::Emails => &self.emails,
            ListField::Addresses => &self.addresses,
            ListField::Websites => &self.websites,
        }
    }

    fn list_mut(&mut self, list: ListField) -> &mut Vec<String> {
        match list {
            ListField::Emails => &mut self.emails.0,
            ListField::Addresses => &mut self.addresses.0,
            ListField::Websites => &mut self.websites.0,
        }
    }

    /// Replace a scalar field.
    pub fn set_field(mut self, field: ScalarField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            ScalarField::FullName => self.full_name = value,
            ScalarField::PhoneNumber => self.phone_number = value,
            ScalarField::WhatsappNumber => self.whatsapp_number = value,
            ScalarField::LinkedIn => self.linked_in = Some(value),
            ScalarField::Facebook => self.facebook = Some(value),
            ScalarField::Instagram => self.instagram = Some(value),
            ScalarField::Twitter => self.twitter = Some(value),
            ScalarField::PersonalEmail => self.fixed.personal_email = Some(value),
            ScalarField::JobEmail => self.fixed.job_email = Some(value),
            ScalarField::WorkEmail => self.fixed.work_email = Some(value),
            ScalarField::BangladeshAddress => self.fixed.bangladesh_address = Some(value),
            ScalarField::UsaAddress1 => self.fixed.usa_address1 = Some(value),
            ScalarField::UsaAddress2 => self.fixed.usa_address2 = Some(value),
            ScalarField::TrainingWebsite => self.fixed.training_website = Some(value),
            ScalarField::EducationalWebsite => self.fixed.educational_website = Some(value),
            ScalarField::PortfolioWebsite => self.fixed.portfolio_website = Some(value),
            ScalarField::LisuFoundation => self.fixed.lisu_foundation = Some(value),
            ScalarField::MadrashaOrphanage => self.fixed.madrasha_orphanage = Some(value),
        }
        self
    }

    /// Replace one list element. Other slots keep their value and position.
    pub fn set_list_item(
        mut self,
        list: ListField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let items = self.list_mut(list);
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange { list, index, len })?;
        *slot = value.into();
        Ok(self)
    }

    /// Append a blank slot. No-op once the list holds [`MAX_LIST_LEN`] entries.
    pub fn append_list_item(mut self, list: ListField) -> Self {
        let items = self.list_mut(list);
        if items.len() < MAX_LIST_LEN {
            items.push(String::new());
        }
        self
    }

    /// Remove the slot at `index`. No-op while the list has a single slot.
    pub fn remove_list_item(mut self, list: ListField, index: usize) -> Result<Self, RecordError> {
        let items = self.list_mut(list);
        let len = items.len();
        if len <= 1 {
            return Ok(self);
        }
        if index >= len {
            return Err(RecordError::IndexOutOfRange { list, index, len });
        }
        items.remove(index);
        Ok(self)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Present social URLs in priority order: LinkedIn, Facebook, Instagram, Twitter.
    pub fn social_links(&self) -> impl Iterator<Item = (ScalarField, &str)> {
        [
            ScalarField::LinkedIn,
            ScalarField::Facebook,
            ScalarField::Instagram,
            ScalarField::Twitter,
        ]
        .into_iter()
        .filter_map(|field| self.present_scalar(field).map(|v| (field, v)))
    }

    /// Whether the record carries anything worth encoding for `mode`.
    pub fn has_content(&self, mode: Mode) -> bool {
        match mode {
            Mode::TextMessage => present(&self.phone_number).is_some(),
            Mode::SocialMedia => {
                self.social_links().next().is_some() || self.websites.present().next().is_some()
            }
            Mode::PhoneContact => {
                ScalarField::ALL
                    .into_iter()
                    .any(|field| self.present_scalar(field).is_some())
                    || ListField::ALL
                        .into_iter()
                        .any(|list| self.repeatable(list).present().next().is_some())
            }
        }
    }

    /// First non-blank website, trimmed.
    pub fn first_website(&self) -> Option<&str> {
        self.websites.present().next()
    }

    /// Trimmed LinkedIn URL, if any.
    pub fn linked_in_url(&self) -> Option<&str> {
        present_opt(self.linked_in.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_one_blank_slot_per_list() {
        let record = Record::new();
        for list in ListField::ALL {
            assert_eq!(record.list(list), [String::new()]);
        }
        assert_eq!(record.mode, Mode::PhoneContact);
        assert!(record.full_name.is_empty());
    }

    #[test]
    fn test_set_field_replaces_scalar() {
        let record = Record::new()
            .set_field(ScalarField::FullName, "Jane Doe")
            .set_field(ScalarField::Instagram, "instagram.com/jane");
        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.instagram.as_deref(), Some("instagram.com/jane"));
        assert_eq!(record.scalar(ScalarField::Twitter), None);
    }

    #[test]
    fn test_set_list_item_is_index_scoped() {
        let record = Record::new()
            .append_list_item(ListField::Emails)
            .append_list_item(ListField::Emails)
            .set_list_item(ListField::Emails, 0, "a@x.com")
            .unwrap()
            .set_list_item(ListField::Emails, 2, "c@x.com")
            .unwrap();
        let edited = record
            .clone()
            .set_list_item(ListField::Emails, 1, "b@x.com")
            .unwrap();

        assert_eq!(edited.list(ListField::Emails), ["a@x.com", "b@x.com", "c@x.com"]);
        assert_eq!(record.list(ListField::Emails), ["a@x.com", "", "c@x.com"]);
    }

    #[test]
    fn test_set_list_item_out_of_range() {
        let err = Record::new()
            .set_list_item(ListField::Websites, 1, "x.com")
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::IndexOutOfRange {
                list: ListField::Websites,
                index: 1,
                len: 1
            }
        );
        assert!(err.to_string().contains("websites"));
    }

    #[test]
    fn test_append_stops_at_max() {
        let mut record = Record::new();
        for _ in 0..25 {
            record = record.append_list_item(ListField::Addresses);
        }
        assert_eq!(record.list(ListField::Addresses).len(), MAX_LIST_LEN);
    }

    #[test]
    fn test_remove_keeps_one_slot() {
        let record = Record::new()
            .set_list_item(ListField::Emails, 0, "only@x.com")
            .unwrap()
            .remove_list_item(ListField::Emails, 0)
            .unwrap();
        assert_eq!(record.list(ListField::Emails), ["only@x.com"]);

        // A single-slot list ignores the index entirely.
        let record = record.remove_list_item(ListField::Emails, 7).unwrap();
        assert_eq!(record.list(ListField::Emails).len(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let record = Record::new()
            .append_list_item(ListField::Websites)
            .append_list_item(ListField::Websites)
            .set_list_item(ListField::Websites, 0, "a.com")
            .unwrap()
            .set_list_item(ListField::Websites, 1, "b.com")
            .unwrap()
            .set_list_item(ListField::Websites, 2, "c.com")
            .unwrap()
            .remove_list_item(ListField::Websites, 1)
            .unwrap();
        assert_eq!(record.list(ListField::Websites), ["a.com", "c.com"]);
        assert!(record.remove_list_item(ListField::Websites, 2).is_err());
    }

    #[test]
    fn test_has_content_per_mode() {
        let blank = Record::new();
        for mode in Mode::ALL {
            assert!(!blank.has_content(mode));
        }

        let phone_only = Record::new().set_field(ScalarField::PhoneNumber, "+1 555");
        assert!(phone_only.has_content(Mode::TextMessage));
        assert!(phone_only.has_content(Mode::PhoneContact));
        assert!(!phone_only.has_content(Mode::SocialMedia));

        let site_only = Record::new()
            .set_list_item(ListField::Websites, 0, "example.org")
            .unwrap();
        assert!(site_only.has_content(Mode::SocialMedia));
        assert!(!site_only.has_content(Mode::TextMessage));
    }

    #[test]
    fn test_deserialize_form_keys() {
        let json = r#"{
            "fullName": "Jane",
            "phoneNumber": "+15550100",
            "emails": ["a@x.com", "", "b@x.com"],
            "addresses": [],
            "linkedIn": "linkedin.com/in/jane",
            "personalEmail": "jane@home.org",
            "mode": "socialMedia"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name, "Jane");
        assert_eq!(record.list(ListField::Emails).len(), 3);
        assert_eq!(record.list(ListField::Addresses), [String::new()]);
        assert_eq!(record.list(ListField::Websites), [String::new()]);
        assert_eq!(record.fixed.personal_email.as_deref(), Some("jane@home.org"));
        assert_eq!(record.mode, Mode::SocialMedia);
    }

    #[test]
    fn test_deserialize_rejects_long_list() {
        let emails: Vec<String> = (0..11).map(|i| format!("{i}@x.com")).collect();
        let json = serde_json::json!({ "emails": emails });
        let err = serde_json::from_value::<Record>(json).unwrap_err();
        assert!(err.to_string().contains("at most 10"));
    }
}
