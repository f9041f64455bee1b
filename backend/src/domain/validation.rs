//! String predicates for site creation input.
//!
//! # Rules
//!
//! - Site name: one or more of `A-Z`, `a-z`, `0-9`, `-`.
//! - Site title: starts with a letter or digit, then letters, digits, spaces,
//!   or hyphens.
//! - Email: `local@domain` where the local part is a dot-atom (no leading,
//!   trailing, or doubled dots) and the domain has at least one dot and ends
//!   in an alphabetic label of two or more characters.
//!
//! Only ASCII letters and digits count; the network's host names are ASCII
//! and titles follow the same alphabet.

use std::sync::OnceLock;

use regex::Regex;

/// Longest email address accepted, per the SMTP path limit.
pub const EMAIL_MAX_LEN: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+",
            r"[A-Za-z]{2,}$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` when `name` is usable as a site name.
///
/// # Examples
///
/// ```
/// use multisite_json_api::domain::is_valid_sitename;
///
/// assert!(is_valid_sitename("dashes-are-ok"));
/// assert!(!is_valid_sitename("No spaces"));
/// assert!(!is_valid_sitename(""));
/// ```
#[must_use]
pub fn is_valid_sitename(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_sitename_char)
}

/// Returns `true` when `address` looks like a deliverable email address.
///
/// # Examples
///
/// ```
/// use multisite_json_api::domain::is_valid_email;
///
/// assert!(is_valid_email("valid+tag@gmail.com"));
/// assert!(is_valid_email("valid@bbc.co.uk"));
/// assert!(!is_valid_email("notanemail.com"));
/// ```
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    address.len() <= EMAIL_MAX_LEN && email_regex().is_match(address)
}

/// Returns `true` when `title` is usable as a site title.
///
/// # Examples
///
/// ```
/// use multisite_json_api::domain::is_valid_site_title;
///
/// assert!(is_valid_site_title("Hyphens-are-ok"));
/// assert!(!is_valid_site_title("?Que?"));
/// ```
#[must_use]
pub fn is_valid_site_title(title: &str) -> bool {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => chars.all(is_site_title_char),
        _ => false,
    }
}

const fn is_sitename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

const fn is_site_title_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '-'
}
