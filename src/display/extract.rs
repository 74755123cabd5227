//! Short identifiers (usernames, hosts) pulled out of profile URLs.
//!
//! Extraction is two-stage: a structured parse with the `url` crate first,
//! and a pattern scan for `platform.com/<segment>` only when parsing fails.
//! Both stages return `Option`; nothing here errors.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

use super::Platform;
use crate::encode::normalize_url;
use crate::model::present;

static PROFILE_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:linkedin\.com/in/|facebook\.com/|instagram\.com/|twitter\.com/|x\.com/)([^/?#\s]+)",
    )
    .expect("profile path regex")
});

/// Parse `raw` as a URL, assuming `https://` when no http(s) scheme is given.
pub fn parse_loose(raw: &str) -> Result<Url, url::ParseError> {
    Url::parse(&normalize_url(raw))
}

/// Identifier for a profile URL.
///
/// LinkedIn `/in/<name>/...` yields `<name>`; everything else yields the last
/// non-empty path segment.
pub fn extract_identifier(raw: &str, platform: Platform) -> Option<String> {
    let trimmed = present(raw)?;
    match parse_loose(trimmed) {
        Ok(url) => identifier_from_path(&url, platform),
        Err(err) => {
            debug!(%platform, error = %err, "url parse failed, scanning for profile path");
            scan_identifier(trimmed)
        }
    }
}

fn identifier_from_path(url: &Url, platform: Platform) -> Option<String> {
    let parts: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let last = parts.last()?;

    let identifier = if platform == Platform::LinkedIn && parts.len() > 1 && parts[0] == "in" {
        parts[1]
    } else {
        last.split(['?', '#']).next().unwrap_or_default()
    };

    (!identifier.is_empty()).then(|| identifier.to_string())
}

/// Pattern fallback for values the URL parser rejects.
pub fn scan_identifier(raw: &str) -> Option<String> {
    PROFILE_PATH_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Host of a website URL without a leading `www.`.
pub fn website_host(raw: &str) -> Option<String> {
    let trimmed = present(raw)?;
    let url = parse_loose(trimmed).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then(|| host.to_string())
}
