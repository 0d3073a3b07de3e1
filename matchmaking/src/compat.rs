//! Compatibility Matcher.

use anon_core::{PreferenceDimension, Preferences};

/// Two users are compatible unless some dimension is set on both sides with different values.
/// A dimension left unset by either side imposes no constraint.
pub fn is_compatible(a: &Preferences, b: &Preferences) -> bool {
    PreferenceDimension::ALL
        .iter()
        .all(|&dim| match (a.get(dim), b.get(dim)) {
            (Some(x), Some(y)) => x == y,
            _ => true,
        })
}
