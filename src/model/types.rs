//! Field and mode enums shared by the record, encoder and deriver.

use serde::{Deserialize, Serialize};

/// Encoding profile a record is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Contact card text.
    #[default]
    PhoneContact,
    /// One social/website URL, or a newline-separated list of them.
    SocialMedia,
    /// Bare phone number for a text-message target.
    TextMessage,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::PhoneContact, Mode::SocialMedia, Mode::TextMessage];

    /// Kebab-case name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhoneContact => "phone-contact",
            Self::SocialMedia => "social-media",
            Self::TextMessage => "text-message",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "phone-contact" | "phonecontact" | "contact" | "vcard" => Ok(Self::PhoneContact),
            "social-media" | "socialmedia" | "social" => Ok(Self::SocialMedia),
            "text-message" | "textmessage" | "text" | "sms" => Ok(Self::TextMessage),
            other => Err(format!(
                "unknown mode '{other}'. Valid modes: phone-contact, social-media, text-message"
            )),
        }
    }
}

/// Single-valued fields of a record.
///
/// The first seven belong to every form; the rest only appear on the
/// fixed-label form and are encoded by the fixed-label profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FullName,
    PhoneNumber,
    WhatsappNumber,
    LinkedIn,
    Facebook,
    Instagram,
    Twitter,
    PersonalEmail,
    JobEmail,
    WorkEmail,
    BangladeshAddress,
    UsaAddress1,
    UsaAddress2,
    TrainingWebsite,
    EducationalWebsite,
    PortfolioWebsite,
    LisuFoundation,
    MadrashaOrphanage,
}

impl ScalarField {
    pub const ALL: [ScalarField; 18] = [
        Self::FullName,
        Self::PhoneNumber,
        Self::WhatsappNumber,
        Self::LinkedIn,
        Self::Facebook,
        Self::Instagram,
        Self::Twitter,
        Self::PersonalEmail,
        Self::JobEmail,
        Self::WorkEmail,
        Self::BangladeshAddress,
        Self::UsaAddress1,
        Self::UsaAddress2,
        Self::TrainingWebsite,
        Self::EducationalWebsite,
        Self::PortfolioWebsite,
        Self::LisuFoundation,
        Self::MadrashaOrphanage,
    ];

    /// Form key, as used in serialized records.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::PhoneNumber => "phoneNumber",
            Self::WhatsappNumber => "whatsappNumber",
            Self::LinkedIn => "linkedIn",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::PersonalEmail => "personalEmail",
            Self::JobEmail => "jobEmail",
            Self::WorkEmail => "workEmail",
            Self::BangladeshAddress => "bangladeshAddress",
            Self::UsaAddress1 => "usaAddress1",
            Self::UsaAddress2 => "usaAddress2",
            Self::TrainingWebsite => "trainingWebsite",
            Self::EducationalWebsite => "educationalWebsite",
            Self::PortfolioWebsite => "portfolioWebsite",
            Self::LisuFoundation => "lisuFoundation",
            Self::MadrashaOrphanage => "madrashaOrphanage",
        }
    }
}

impl std::fmt::Display for ScalarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ScalarField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// Repeatable (list-valued) fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    Emails,
    Addresses,
    Websites,
}

impl ListField {
    pub const ALL: [ListField; 3] = [Self::Emails, Self::Addresses, Self::Websites];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Emails => "emails",
            Self::Addresses => "addresses",
            Self::Websites => "websites",
        }
    }
}

impl std::fmt::Display for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ListField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown list '{s}'. Valid lists: emails, addresses, websites"))
    }
}

/// Returns the trimmed value when it carries anything, `None` for blank input.
pub fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Same as [`present`] for optional fields.
pub fn present_opt(value: Option<&String>) -> Option<&str> {
    value.and_then(|v| present(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_aliases() {
        assert_eq!("social-media".parse::<Mode>().unwrap(), Mode::SocialMedia);
        assert_eq!("Text_Message".parse::<Mode>().unwrap(), Mode::TextMessage);
        assert_eq!("vcard".parse::<Mode>().unwrap(), Mode::PhoneContact);
        assert!("fax".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serde_uses_camel_case() {
        let json = serde_json::to_string(&Mode::SocialMedia).unwrap();
        assert_eq!(json, "\"socialMedia\"");
        let back: Mode = serde_json::from_str("\"textMessage\"").unwrap();
        assert_eq!(back, Mode::TextMessage);
    }

    #[test]
    fn test_scalar_field_keys_roundtrip() {
        for field in ScalarField::ALL {
            assert_eq!(field.key().parse::<ScalarField>().unwrap(), field);
        }
        assert!("nickname".parse::<ScalarField>().is_err());
    }

    #[test]
    fn test_present_treats_whitespace_as_blank() {
        assert_eq!(present("  "), None);
        assert_eq!(present("\n\t"), None);
        assert_eq!(present("  jane "), Some("jane"));
        assert_eq!(present_opt(None), None);
    }
}
