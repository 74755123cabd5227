//! Filesystem-safe slugs for export filenames.
//!
//! Slugs are lowercase ASCII letters and digits separated by single hyphens,
//! never starting or ending with a hyphen. Anything else collapses into one
//! separator.

/// Longest filename component accepted by common filesystems.
pub const MAX_FILENAME_LEN: usize = 255;

/// Lowercase `s` and collapse every run of characters outside `[a-z0-9]` into `-`.
///
/// # Examples
/// ```
/// use gits_qr::display::slug::slugify;
/// assert_eq!(slugify("Jöhn O'Brien!!"), "j-hn-o-brien");
/// assert_eq!(slugify("linkedin-Jane_Doe"), "linkedin-jane-doe");
/// ```
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending_separator = false;

    for c in s.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !result.is_empty() {
                result.push('-');
            }
            pending_separator = false;
            result.push(c);
        } else {
            pending_separator = true;
        }
    }

    result
}

/// Keep a leading `+` and the digits of a phone number, drop everything else.
pub fn phone_slug(phone: &str) -> String {
    let trimmed = phone.trim();
    let mut out = String::new();

    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));

    if out == "+" { String::new() } else { out }
}

/// Truncate a filename stem so that `stem + ext` fits [`MAX_FILENAME_LEN`].
pub fn enforce_max_len(mut stem: String, ext: &str) -> String {
    let limit = MAX_FILENAME_LEN.saturating_sub(ext.len()).max(1);
    if stem.len() > limit {
        let safe_limit = truncate_to_char_boundary(&stem, limit);
        stem.truncate(safe_limit);
        stem = stem.trim_end_matches('-').to_string();
    }
    stem
}

/// Find the largest byte index <= `max_bytes` that is on a UTF-8 char boundary.
fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> usize {
    if max_bytes >= s.len() {
        return s.len();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Characters that are invalid in filenames across platforms.
const INVALID_CHARS: &[char] = &[
    '<', '>', ':', '"', '/', '\\', '|', '?', '*', '\0', '\n', '\r', '\t',
];

/// Check if a filename is valid across platforms.
pub fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_FILENAME_LEN {
        return false;
    }

    if name.chars().any(|c| INVALID_CHARS.contains(&c)) {
        return false;
    }

    !(name.starts_with(' ') || name.starts_with('.') || name.ends_with(' ') || name.ends_with('.'))
}
