//! Comparison capability shared by every resource shape.

use std::collections::BTreeMap;

use crate::types::PluralCategory;

/// Field-by-field comparison of translatable values.
///
/// Each shape implements it once; callers pick the string comparison. Exact
/// equality backs `Resource::equals`, normalized equality backs
/// `Resource::is_instance`.
pub trait CompareFields {
    /// Compares every string pair with `eq`. Shapes must line up exactly.
    fn compare_fields_with<F>(&self, other: &Self, eq: F) -> bool
    where
        F: Fn(&str, &str) -> bool;

    /// Exact comparison.
    fn compare_fields(&self, other: &Self) -> bool {
        self.compare_fields_with(other, |a, b| a == b)
    }
}

impl CompareFields for String {
    fn compare_fields_with<F>(&self, other: &Self, eq: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        eq(self, other)
    }
}

impl CompareFields for Vec<String> {
    fn compare_fields_with<F>(&self, other: &Self, eq: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| eq(a, b))
    }
}

impl CompareFields for BTreeMap<PluralCategory, String> {
    fn compare_fields_with<F>(&self, other: &Self, eq: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        self.len() == other.len()
            && self
                .iter()
                .all(|(category, a)| other.get(category).is_some_and(|b| eq(a, b)))
    }
}
