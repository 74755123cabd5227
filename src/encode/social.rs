//! URL payloads for the social-media mode.

use tracing::debug;

use super::profile::FieldProfile;
use crate::model::Record;

/// Present social links then websites, normalized, in priority order.
pub fn collect_links(record: &Record, profile: &FieldProfile) -> Vec<String> {
    record
        .social_links()
        .map(|(_, url)| url)
        .chain(profile.websites(record))
        .map(normalize_url)
        .collect()
}

/// Join collected links into a scannable payload.
///
/// Zero links yields `fallback_url`; a single link is returned bare.
pub fn encode_links(record: &Record, profile: &FieldProfile, fallback_url: &str) -> String {
    let links = collect_links(record, profile);
    match links.len() {
        0 => {
            debug!(fallback_url, "no social links, emitting fallback url");
            fallback_url.to_string()
        }
        1 => links.into_iter().next().unwrap_or_default(),
        _ => links.join("\n"),
    }
}

/// Prefix `https://` unless the value already carries an http(s) scheme.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

pub(crate) fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
