use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SlugError;

/// Width of the `YYYY-MM-DD-` prefix
pub const DATE_PREFIX_LEN: usize = 11;
/// Width of the `.md` suffix assumed by the fixed-width derivation
pub const EXTENSION_SUFFIX_LEN: usize = 3;

static POST_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})-(?P<rest>.*)$")
        .expect("valid post name regex")
});

/// A post file name split into its date, slug and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostName {
    pub date: NaiveDate,
    pub slug: String,
    pub extension: String,
}

/// Strip the fixed-width date prefix and extension suffix from a file name.
///
/// Returns `None` when the name is too short, when a cut point falls inside a
/// multi-byte character, or when nothing is left between the two.
pub fn derive_slug_fixed(name: &str) -> Option<String> {
    if name.len() < DATE_PREFIX_LEN + EXTENSION_SUFFIX_LEN {
        return None;
    }
    name.get(DATE_PREFIX_LEN..name.len() - EXTENSION_SUFFIX_LEN)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse `YYYY-MM-DD-<slug>.<ext>` into a [`PostName`].
///
/// The date must be a real calendar date and `ext` must match one of
/// `extensions` (case-insensitive, without the leading dot).
pub fn derive_slug(name: &str, extensions: &[String]) -> Result<PostName, SlugError> {
    let caps = POST_NAME
        .captures(name)
        .ok_or(SlugError::MissingDatePrefix)?;

    let date_str = &caps["date"];
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| SlugError::InvalidDate(date_str.to_string()))?;

    let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("");
    let (body, extension) = rest.rsplit_once('.').ok_or(SlugError::MissingExtension)?;

    if !extensions
        .iter()
        .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
    {
        return Err(SlugError::UnsupportedExtension(extension.to_string()));
    }

    if body.is_empty() {
        return Err(SlugError::EmptySlug);
    }

    Ok(PostName {
        date,
        slug: body.to_string(),
        extension: extension.to_string(),
    })
}
