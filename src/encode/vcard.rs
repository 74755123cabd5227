//! vCard 3.0 text for the phone-contact mode.

use tracing::debug;

use super::profile::{AddressLabel, FieldProfile, FieldSource, LineKind, Omission};
use crate::model::{Record, present};

pub const BEGIN: &str = "BEGIN:VCARD";
pub const VERSION: &str = "VERSION:3.0";
pub const END: &str = "END:VCARD";

/// Value treated as "not provided" by the filter-after strategy.
const NOT_AVAILABLE: &str = "N/A";

/// A constructed content line and the raw value it was built from.
#[derive(Debug, Clone)]
struct CardLine {
    text: String,
    value: String,
}

/// Build the card text for `record` under `profile`.
///
/// Lines are joined with `\n` and carry no trailing newline.
pub fn encode_card(record: &Record, profile: &FieldProfile, placeholder_name: &str) -> String {
    let mut body: Vec<CardLine> = Vec::new();

    for rule in profile.rules {
        match rule.source {
            FieldSource::Scalar(field) => {
                let raw = record.scalar(field).unwrap_or("");
                push_line(&mut body, profile.omission, rule.kind, raw, None);
            }
            FieldSource::List(field) => {
                for (index, raw) in record.list(field).iter().enumerate() {
                    push_line(&mut body, profile.omission, rule.kind, raw, Some(index));
                }
            }
        }
    }

    if profile.omission == Omission::FilterAfter {
        body.retain(|line| !is_unfilled(&line.value));
    }

    if body.is_empty() && profile.placeholder_fallback {
        debug!(
            profile = %profile.kind,
            "no card content, emitting placeholder card"
        );
        return placeholder_card(placeholder_name);
    }

    let mut lines = Vec::with_capacity(body.len() + 3);
    lines.push(BEGIN.to_string());
    lines.push(VERSION.to_string());
    lines.extend(body.into_iter().map(|line| line.text));
    lines.push(END.to_string());
    lines.join("\n")
}

/// Minimal card carrying only a formatted name.
pub fn placeholder_card(name: &str) -> String {
    let name_line = format!("FN:{}", fold_line_breaks(name));
    [BEGIN, VERSION, name_line.as_str(), END].join("\n")
}

/// Street value for an `ADR` line: embedded line breaks become `"; "`.
pub fn join_address_lines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace(['\r', '\n'], "; ")
}

/// Value for a single-line field: each run of CR/LF becomes one space.
pub fn fold_line_breaks(raw: &str) -> String {
    raw.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_line(
    body: &mut Vec<CardLine>,
    omission: Omission,
    kind: LineKind,
    raw: &str,
    index: Option<usize>,
) {
    if omission == Omission::SkipBlank && present(raw).is_none() {
        return;
    }
    body.push(CardLine {
        text: line_text(kind, raw, index),
        value: raw.to_string(),
    });
}

fn line_text(kind: LineKind, raw: &str, index: Option<usize>) -> String {
    let value = || fold_line_breaks(raw);
    match kind {
        LineKind::FormattedName => format!("FN:{}", value()),
        LineKind::CellPhone => format!("TEL;TYPE=CELL:{}", value()),
        LineKind::WhatsApp => format!("TEL;TYPE=CELL,WA:{}", value()),
        LineKind::Email(tag) => format!("EMAIL;TYPE={}:{}", tag.as_str(), value()),
        LineKind::Address(tag, label) => {
            let label = match label {
                AddressLabel::Indexed => format!("Address {}", index.unwrap_or(0) + 1),
                AddressLabel::Fixed(text) => text.to_string(),
            };
            format!(
                "ADR;TYPE={};LABEL=\"{label}\":;;{};;;",
                tag.as_str(),
                join_address_lines(raw)
            )
        }
        LineKind::Url(tag) => format!("URL;TYPE={}:{}", tag.as_str(), value()),
    }
}

fn is_unfilled(value: &str) -> bool {
    match present(value) {
        None => true,
        Some(v) => v.eq_ignore_ascii_case(NOT_AVAILABLE),
    }
}
