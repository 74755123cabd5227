//! Human-readable labels and export filenames derived from a record.
//!
//! Both derivations are pure and total: unparseable URLs degrade to the bare
//! platform name, and empty records get fixed fallbacks.
//!
//! | mode          | label                          | filename                                   |
//! |---------------|--------------------------------|--------------------------------------------|
//! | phone contact | full name or `Contact Card`    | `GITS-qr-code-contact-<name>.png`          |
//! | social media  | `LinkedIn: jdoe, Website: ...` | `GITS-qr-code-linkedin-jdoe-website-x.png` |
//! | text message  | `Text Message`                 | `GITS-qr-code-text-message-<digits>.png`   |

pub mod extract;
pub mod slug;

pub use extract::{extract_identifier, website_host};

use crate::encode::ProfileKind;
use crate::model::{Mode, Record, ScalarField};

pub const DEFAULT_BRAND_PREFIX: &str = "GITS-";
pub const TEXT_MESSAGE_LABEL: &str = "Text Message";
pub const SOCIAL_MEDIA_LABEL: &str = "Social Media";
pub const CONTACT_CARD_LABEL: &str = "Contact Card";

const FILE_EXT: &str = ".png";

/// Link kinds shown in social labels and filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LinkedIn,
    Facebook,
    Instagram,
    Twitter,
    Website,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Website => "Website",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Website => "website",
        }
    }

    pub fn from_field(field: ScalarField) -> Option<Self> {
        match field {
            ScalarField::LinkedIn => Some(Self::LinkedIn),
            ScalarField::Facebook => Some(Self::Facebook),
            ScalarField::Instagram => Some(Self::Instagram),
            ScalarField::Twitter => Some(Self::Twitter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Knobs for [`label_with`] and [`filename_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    /// Brand tag every filename starts with.
    pub prefix: String,
    /// Profile deciding which fields count as websites.
    pub profile: ProfileKind,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_BRAND_PREFIX.to_string(),
            profile: ProfileKind::default(),
        }
    }
}

/// A present link and the identifier extracted from it, if any.
struct LinkEntry {
    platform: Platform,
    identifier: Option<String>,
}

fn social_entries(record: &Record) -> Vec<LinkEntry> {
    record
        .social_links()
        .filter_map(|(field, url)| {
            let platform = Platform::from_field(field)?;
            Some(LinkEntry {
                platform,
                identifier: extract_identifier(url, platform),
            })
        })
        .collect()
}

fn first_website<'a>(record: &'a Record, options: &NamingOptions) -> Option<&'a str> {
    options.profile.profile().websites(record).into_iter().next()
}

/// Overlay label with default options.
pub fn label(record: &Record, mode: Mode) -> String {
    label_with(record, mode, &NamingOptions::default())
}

pub fn label_with(record: &Record, mode: Mode, options: &NamingOptions) -> String {
    match mode {
        Mode::TextMessage => TEXT_MESSAGE_LABEL.to_string(),
        Mode::SocialMedia => {
            let mut parts: Vec<String> = social_entries(record)
                .into_iter()
                .map(|entry| match entry.identifier {
                    Some(id) => format!("{}: {id}", entry.platform),
                    None => entry.platform.to_string(),
                })
                .collect();

            if let Some(website) = first_website(record, options) {
                parts.push(match website_host(website) {
                    Some(host) => format!("{}: {host}", Platform::Website),
                    None => Platform::Website.to_string(),
                });
            }

            if parts.is_empty() {
                SOCIAL_MEDIA_LABEL.to_string()
            } else {
                parts.join(", ")
            }
        }
        Mode::PhoneContact => record
            .present_scalar(ScalarField::FullName)
            .unwrap_or(CONTACT_CARD_LABEL)
            .to_string(),
    }
}

/// Export filename with default options.
pub fn filename(record: &Record, mode: Mode) -> String {
    filename_with(record, mode, &NamingOptions::default())
}

pub fn filename_with(record: &Record, mode: Mode, options: &NamingOptions) -> String {
    let stem = match mode {
        Mode::TextMessage => {
            let digits = slug::phone_slug(&record.phone_number);
            let digits = if digits.is_empty() { "phone".to_string() } else { digits };
            format!("qr-code-text-message-{digits}")
        }
        Mode::SocialMedia => {
            let mut tokens: Vec<String> = social_entries(record)
                .into_iter()
                .map(|entry| match entry.identifier {
                    Some(id) => format!("{}-{id}", entry.platform.slug()),
                    None => entry.platform.slug().to_string(),
                })
                .collect();

            if let Some(website) = first_website(record, options) {
                let domain = website_host(website)
                    .and_then(|host| host.split('.').next().map(str::to_string))
                    .filter(|d| !d.is_empty());
                tokens.push(match domain {
                    Some(d) => format!("{}-{d}", Platform::Website.slug()),
                    None => Platform::Website.slug().to_string(),
                });
            }

            let combined = slug::slugify(&tokens.join("-"));
            if combined.is_empty() {
                "qr-code-social-media".to_string()
            } else {
                format!("qr-code-{combined}")
            }
        }
        Mode::PhoneContact => {
            let name = slug::slugify(record.full_name.trim());
            let name = if name.is_empty() { "card".to_string() } else { name };
            format!("qr-code-contact-{name}")
        }
    };

    let stem = slug::enforce_max_len(format!("{}{stem}", options.prefix), FILE_EXT);
    format!("{stem}{FILE_EXT}")
}

/// Platform names shown above a social code, in display order.
pub fn platform_tags(record: &Record, profile: ProfileKind) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = record
        .social_links()
        .filter_map(|(field, _)| Platform::from_field(field))
        .map(|p| p.display_name())
        .collect();
    if !profile.profile().websites(record).is_empty() {
        tags.push(Platform::Website.display_name());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListField;

    fn social_record() -> Record {
        Record::new()
            .set_field(ScalarField::LinkedIn, "linkedin.com/in/jdoe")
            .set_field(ScalarField::Facebook, "https://facebook.com/")
            .set_list_item(ListField::Websites, 0, "www.Example.com/about")
            .unwrap()
    }

    #[test]
    fn test_text_message_naming() {
        let record = Record::new().set_field(ScalarField::PhoneNumber, "+1 (555) 010-0100");
        assert_eq!(label(&record, Mode::TextMessage), "Text Message");
        assert_eq!(
            filename(&record, Mode::TextMessage),
            "GITS-qr-code-text-message-+15550100100.png"
        );
        assert_eq!(
            filename(&Record::new(), Mode::TextMessage),
            "GITS-qr-code-text-message-phone.png"
        );
    }

    #[test]
    fn test_social_label() {
        assert_eq!(
            label(&social_record(), Mode::SocialMedia),
            "LinkedIn: jdoe, Facebook, Website: example.com"
        );
        assert_eq!(label(&Record::new(), Mode::SocialMedia), "Social Media");
    }

    #[test]
    fn test_social_label_unparseable_website() {
        let record = Record::new()
            .set_list_item(ListField::Websites, 0, "my site.com")
            .unwrap();
        assert_eq!(label(&record, Mode::SocialMedia), "Website");
        assert_eq!(filename(&record, Mode::SocialMedia), "GITS-qr-code-website.png");
    }

    #[test]
    fn test_social_filename() {
        assert_eq!(
            filename(&social_record(), Mode::SocialMedia),
            "GITS-qr-code-linkedin-jdoe-facebook-website-example.png"
        );
        assert_eq!(
            filename(&Record::new(), Mode::SocialMedia),
            "GITS-qr-code-social-media.png"
        );
    }

    #[test]
    fn test_social_filename_cleans_identifiers() {
        let record = Record::new().set_field(ScalarField::Instagram, "instagram.com/Jane.Doe__");
        assert_eq!(
            filename(&record, Mode::SocialMedia),
            "GITS-qr-code-instagram-jane-doe.png"
        );
    }

    #[test]
    fn test_contact_naming() {
        let record = Record::new().set_field(ScalarField::FullName, "  Jöhn O'Brien!! ");
        assert_eq!(label(&record, Mode::PhoneContact), "Jöhn O'Brien!!");
        assert_eq!(
            filename(&record, Mode::PhoneContact),
            "GITS-qr-code-contact-j-hn-o-brien.png"
        );
        assert_eq!(label(&Record::new(), Mode::PhoneContact), "Contact Card");
        assert_eq!(
            filename(&Record::new(), Mode::PhoneContact),
            "GITS-qr-code-contact-card.png"
        );
        let symbols = Record::new().set_field(ScalarField::FullName, "!!!");
        assert_eq!(
            filename(&symbols, Mode::PhoneContact),
            "GITS-qr-code-contact-card.png"
        );
    }

    #[test]
    fn test_custom_prefix() {
        let options = NamingOptions {
            prefix: "ACME_".into(),
            ..Default::default()
        };
        let record = Record::new().set_field(ScalarField::FullName, "Jane");
        assert_eq!(
            filename_with(&record, Mode::PhoneContact, &options),
            "ACME_qr-code-contact-jane.png"
        );
    }

    #[test]
    fn test_filenames_are_valid() {
        let record = social_record()
            .set_field(ScalarField::FullName, "a/b\\c:d")
            .set_field(ScalarField::PhoneNumber, "+44 20 7946 0958");
        for mode in Mode::ALL {
            assert!(slug::is_valid_filename(&filename(&record, mode)));
        }
    }

    #[test]
    fn test_platform_tags() {
        assert_eq!(
            platform_tags(&social_record(), ProfileKind::Repeatable),
            vec!["LinkedIn", "Facebook", "Website"]
        );
        assert!(platform_tags(&Record::new(), ProfileKind::Repeatable).is_empty());
    }
}
