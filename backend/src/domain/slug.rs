//! Organization slug derivation and validation.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Derivation is deterministic and collision
//! prone by design: two display names may legitimately slugify to the same
//! value, which is exactly why registration checks the directory before
//! using one.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// URL-safe identifier derived from an organization display name.
///
/// ## Invariants
/// - non-empty, lowercase ASCII letters, digits, and single hyphens only
/// - never starts or ends with a hyphen
///
/// # Examples
/// ```
/// use backend::domain::OrganizationSlug;
///
/// let slug = OrganizationSlug::derive("Helping Hands");
/// assert_eq!(slug.as_ref(), "helping-hands");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrganizationSlug(String);

impl OrganizationSlug {
    /// Derive a slug from a display name.
    ///
    /// Lowercases the input, collapses runs of non-alphanumeric characters
    /// into single hyphens, and strips leading/trailing separators. The
    /// mapping is pure: the same name always yields the same slug.
    ///
    /// A name without any ASCII alphanumerics derives the empty string,
    /// which fails [`Self::is_valid`]; registration rejects such names
    /// before a slug is ever used.
    pub fn derive(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut pending_separator = false;
        for ch in name.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(ch.to_ascii_lowercase());
            } else {
                pending_separator = true;
            }
        }
        Self(slug)
    }

    /// Return `true` when `value` already satisfies the slug invariants.
    pub fn is_valid(value: &str) -> bool {
        is_trimmed_non_empty(value)
            && has_allowed_slug_chars(value)
            && !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--")
    }

    /// Wrap an already-valid slug value, such as one read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Self::is_valid(&value).then_some(Self(value))
    }
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

impl AsRef<str> for OrganizationSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OrganizationSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<OrganizationSlug> for String {
    fn from(value: OrganizationSlug) -> Self {
        value.0
    }
}
