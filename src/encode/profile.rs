//! Field profiles: which record fields become which card lines.
//!
//! A profile is a static table of [`FieldRule`]s plus the strategy used to
//! drop unfilled fields. The encoder walks the table in order, so the table
//! order is the line order of the emitted card.

use serde::{Deserialize, Serialize};

use crate::model::{ListField, Record, ScalarField, present};

/// Named profile selectable from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    /// Repeatable emails/addresses/websites lists.
    #[default]
    Repeatable,
    /// Fixed personal/job/work emails and labeled addresses.
    FixedLabel,
    /// Card saved from a landing link: no LinkedIn line, no placeholder card.
    Landing,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repeatable => "repeatable",
            Self::FixedLabel => "fixed-label",
            Self::Landing => "landing",
        }
    }

    pub fn profile(&self) -> &'static FieldProfile {
        match self {
            Self::Repeatable => &REPEATABLE,
            Self::FixedLabel => &FIXED_LABEL,
            Self::Landing => &LANDING,
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "repeatable" | "default" => Ok(Self::Repeatable),
            "fixed-label" | "fixed" => Ok(Self::FixedLabel),
            "landing" => Ok(Self::Landing),
            other => Err(format!(
                "unknown profile '{other}'. Valid profiles: repeatable, fixed-label, landing"
            )),
        }
    }
}

/// Where a rule reads its value(s) from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Scalar(ScalarField),
    List(ListField),
}

/// vCard `TYPE=` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Work,
    Home,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "WORK",
            Self::Home => "HOME",
        }
    }
}

/// `LABEL=` of an address line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressLabel {
    /// `Address {n}` with the 1-based list position.
    Indexed,
    Fixed(&'static str),
}

/// Shape of the card line a rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    FormattedName,
    CellPhone,
    WhatsApp,
    Email(TypeTag),
    Address(TypeTag, AddressLabel),
    Url(TypeTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub source: FieldSource,
    pub kind: LineKind,
}

const fn scalar(field: ScalarField, kind: LineKind) -> FieldRule {
    FieldRule {
        source: FieldSource::Scalar(field),
        kind,
    }
}

const fn list(field: ListField, kind: LineKind) -> FieldRule {
    FieldRule {
        source: FieldSource::List(field),
        kind,
    }
}

/// How unfilled fields are kept out of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Omission {
    /// Blank values never produce a line.
    SkipBlank,
    /// Every rule produces a line; lines whose value is blank or `N/A` are
    /// removed afterwards.
    FilterAfter,
}

/// Which fields feed the website list in social mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebsiteSource {
    List(ListField),
    Scalars(&'static [ScalarField]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldProfile {
    pub kind: ProfileKind,
    pub rules: &'static [FieldRule],
    pub omission: Omission,
    /// Emit a placeholder card instead of an empty one.
    pub placeholder_fallback: bool,
    pub websites: WebsiteSource,
}

impl FieldProfile {
    /// Non-blank website values, trimmed, in field order.
    pub fn websites<'a>(&self, record: &'a Record) -> Vec<&'a str> {
        match self.websites {
            WebsiteSource::List(field) => record.repeatable(field).present().collect(),
            WebsiteSource::Scalars(fields) => fields
                .iter()
                .filter_map(|f| record.scalar(*f).and_then(present))
                .collect(),
        }
    }
}

const REPEATABLE_RULES: &[FieldRule] = &[
    scalar(ScalarField::FullName, LineKind::FormattedName),
    scalar(ScalarField::PhoneNumber, LineKind::CellPhone),
    scalar(ScalarField::WhatsappNumber, LineKind::WhatsApp),
    list(ListField::Emails, LineKind::Email(TypeTag::Work)),
    list(
        ListField::Addresses,
        LineKind::Address(TypeTag::Work, AddressLabel::Indexed),
    ),
    list(ListField::Websites, LineKind::Url(TypeTag::Work)),
    scalar(ScalarField::LinkedIn, LineKind::Url(TypeTag::Work)),
];

const LANDING_RULES: &[FieldRule] = &[
    scalar(ScalarField::FullName, LineKind::FormattedName),
    scalar(ScalarField::PhoneNumber, LineKind::CellPhone),
    scalar(ScalarField::WhatsappNumber, LineKind::WhatsApp),
    list(ListField::Emails, LineKind::Email(TypeTag::Work)),
    list(
        ListField::Addresses,
        LineKind::Address(TypeTag::Work, AddressLabel::Indexed),
    ),
    list(ListField::Websites, LineKind::Url(TypeTag::Work)),
];

const FIXED_WEBSITES: &[ScalarField] = &[
    ScalarField::TrainingWebsite,
    ScalarField::EducationalWebsite,
    ScalarField::PortfolioWebsite,
    ScalarField::LisuFoundation,
    ScalarField::MadrashaOrphanage,
];

const FIXED_LABEL_RULES: &[FieldRule] = &[
    scalar(ScalarField::FullName, LineKind::FormattedName),
    scalar(ScalarField::PhoneNumber, LineKind::CellPhone),
    scalar(ScalarField::WhatsappNumber, LineKind::WhatsApp),
    scalar(ScalarField::PersonalEmail, LineKind::Email(TypeTag::Home)),
    scalar(ScalarField::JobEmail, LineKind::Email(TypeTag::Work)),
    scalar(ScalarField::WorkEmail, LineKind::Email(TypeTag::Work)),
    scalar(
        ScalarField::BangladeshAddress,
        LineKind::Address(TypeTag::Home, AddressLabel::Fixed("Bangladesh Address")),
    ),
    scalar(
        ScalarField::UsaAddress1,
        LineKind::Address(TypeTag::Work, AddressLabel::Fixed("USA Address 1")),
    ),
    scalar(
        ScalarField::UsaAddress2,
        LineKind::Address(TypeTag::Work, AddressLabel::Fixed("USA Address 2")),
    ),
    scalar(ScalarField::TrainingWebsite, LineKind::Url(TypeTag::Work)),
    scalar(ScalarField::EducationalWebsite, LineKind::Url(TypeTag::Work)),
    scalar(ScalarField::PortfolioWebsite, LineKind::Url(TypeTag::Work)),
    scalar(ScalarField::LisuFoundation, LineKind::Url(TypeTag::Work)),
    scalar(ScalarField::MadrashaOrphanage, LineKind::Url(TypeTag::Work)),
    scalar(ScalarField::LinkedIn, LineKind::Url(TypeTag::Work)),
];

pub static REPEATABLE: FieldProfile = FieldProfile {
    kind: ProfileKind::Repeatable,
    rules: REPEATABLE_RULES,
    omission: Omission::SkipBlank,
    placeholder_fallback: true,
    websites: WebsiteSource::List(ListField::Websites),
};

pub static FIXED_LABEL: FieldProfile = FieldProfile {
    kind: ProfileKind::FixedLabel,
    rules: FIXED_LABEL_RULES,
    omission: Omission::FilterAfter,
    placeholder_fallback: true,
    websites: WebsiteSource::Scalars(FIXED_WEBSITES),
};

pub static LANDING: FieldProfile = FieldProfile {
    kind: ProfileKind::Landing,
    rules: LANDING_RULES,
    omission: Omission::SkipBlank,
    placeholder_fallback: false,
    websites: WebsiteSource::List(ListField::Websites),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_kind_parse() {
        assert_eq!("fixed_label".parse::<ProfileKind>().unwrap(), ProfileKind::FixedLabel);
        assert_eq!("Repeatable".parse::<ProfileKind>().unwrap(), ProfileKind::Repeatable);
        assert!("compact".parse::<ProfileKind>().is_err());
    }

    #[test]
    fn test_profile_lookup_matches_kind() {
        for kind in [ProfileKind::Repeatable, ProfileKind::FixedLabel, ProfileKind::Landing] {
            assert_eq!(kind.profile().kind, kind);
        }
    }

    #[test]
    fn test_landing_profile_has_no_linkedin_rule() {
        assert!(
            !LANDING
                .rules
                .iter()
                .any(|r| r.source == FieldSource::Scalar(ScalarField::LinkedIn))
        );
        assert!(!LANDING.placeholder_fallback);
    }

    #[test]
    fn test_fixed_label_websites_read_scalars() {
        let record = Record::new()
            .set_field(ScalarField::PortfolioWebsite, " jane.dev ")
            .set_field(ScalarField::TrainingWebsite, "   ")
            .set_list_item(ListField::Websites, 0, "ignored.example")
            .unwrap();
        assert_eq!(FIXED_LABEL.websites(&record), vec!["jane.dev"]);
        assert_eq!(REPEATABLE.websites(&record), vec!["ignored.example"]);
    }
}
