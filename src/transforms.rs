//! Text transforms used to derive badge ids, titles and SQL literals.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());
static STATE_PARK_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*state park$").unwrap());

/// Suffix appended to every state park badge id
pub const STATE_PARK_ID_SUFFIX: &str = "_state_park";

/// Lowercase, drop punctuation, then collapse whitespace runs to `_`.
///
/// ```
/// use badgegen::transforms::slugify;
/// assert_eq!(slugify("Prince George's County"), "prince_georges_county");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_OR_SPACE.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, "_").into_owned()
}

/// Double every single quote so the value can sit inside a SQL string literal
pub fn escape_sql(text: &str) -> String {
    text.replace('\'', "''")
}

/// County badge id: `slug(county)_code`, with the state code lowercased
pub fn county_badge_id(county: &str, state_code: &str) -> String {
    format!("{}_{}", slugify(county), state_code.to_lowercase())
}

/// Two-letter code after the last `-` of a location descriptor (`US-PA` -> `pa`)
pub fn state_code_from_location(location_desc: &str) -> String {
    location_desc
        .rsplit('-')
        .next()
        .unwrap_or(location_desc)
        .to_lowercase()
}

/// State park badge id.
///
/// A trailing "state park" (any case) is dropped before the name is
/// lowercased and every run of non-word characters becomes `_`.
pub fn state_park_badge_id(name: &str, state_code: &str) -> String {
    let base = STATE_PARK_SUFFIX.replace(name.trim(), "");
    let safe = NON_WORD_RUN.replace_all(&base.to_lowercase(), "_").into_owned();
    format!("{}_{}{}", safe, state_code, STATE_PARK_ID_SUFFIX)
}

/// Display title for a park, appending " State Park" unless already present
pub fn state_park_title(name: &str) -> String {
    if name.trim().to_lowercase().ends_with("state park") {
        name.to_string()
    } else {
        format!("{} State Park", name)
    }
}
