//! Core value types shared by resources and translation units.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::CompareFields};

/// The closed set of resource shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A single string.
    String,

    /// An ordered list of strings.
    Array,

    /// One string per plural category.
    Plural,
}

impl ResourceKind {
    /// Prefix used when building hash keys. Distinct per kind so that resources
    /// of different shapes never share a key.
    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::String => "rs",
            ResourceKind::Array => "ra",
            ResourceKind::Plural => "rp",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::String => "string",
            ResourceKind::Array => "array",
            ResourceKind::Plural => "plural",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(ResourceKind::String),
            "array" => Ok(ResourceKind::Array),
            "plural" => Ok(ResourceKind::Plural),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// Standard CLDR plural forms.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = Error;

    /// Parses a CLDR category name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            PluralCategory::Zero,
            PluralCategory::One,
            PluralCategory::Two,
            PluralCategory::Few,
            PluralCategory::Many,
            PluralCategory::Other,
        ]
        .into_iter()
        .find(|category| category.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| Error::UnknownPluralCategory(s.to_string()))
    }
}

/// The translatable payload of a resource, in one of the supported shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Singular(String),
    Array(Vec<String>),
    Plural(BTreeMap<PluralCategory, String>),
}

impl Content {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Content::Singular(_) => ResourceKind::String,
            Content::Array(_) => ResourceKind::Array,
            Content::Plural(_) => ResourceKind::Plural,
        }
    }

    /// The singular text, if this is a plain string.
    pub fn as_singular(&self) -> Option<&str> {
        match self {
            Content::Singular(value) => Some(value),
            _ => None,
        }
    }

    /// Item at `index`. Plural forms are indexed in category order. A plain
    /// string only has index 0.
    pub fn item(&self, index: usize) -> Option<&str> {
        match self {
            Content::Singular(value) => (index == 0).then_some(value.as_str()),
            Content::Array(items) => items.get(index).map(String::as_str),
            Content::Plural(forms) => forms.values().nth(index).map(String::as_str),
        }
    }

    /// The plural form for `category`, if this is a plural.
    pub fn form(&self, category: PluralCategory) -> Option<&str> {
        match self {
            Content::Plural(forms) => forms.get(&category).map(String::as_str),
            _ => None,
        }
    }

    /// All strings in order.
    pub fn items(&self) -> Vec<&str> {
        match self {
            Content::Singular(value) => vec![value.as_str()],
            Content::Array(items) => items.iter().map(String::as_str).collect(),
            Content::Plural(forms) => forms.values().map(String::as_str).collect(),
        }
    }

    /// True when there is no non-empty string in this content.
    pub fn is_empty(&self) -> bool {
        self.items().iter().all(|item| item.is_empty())
    }
}

impl CompareFields for Content {
    fn compare_fields_with<F>(&self, other: &Self, eq: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        match (self, other) {
            (Content::Singular(a), Content::Singular(b)) => a.compare_fields_with(b, eq),
            (Content::Array(a), Content::Array(b)) => a.compare_fields_with(b, eq),
            (Content::Plural(a), Content::Plural(b)) => a.compare_fields_with(b, eq),
            _ => false,
        }
    }
}

impl Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Singular(value) => write!(f, "{}", value),
            Content::Array(items) => write!(f, "[{}]", items.join(", ")),
            Content::Plural(forms) => write!(
                f,
                "{{{}}}",
                forms
                    .iter()
                    .map(|(category, value)| format!("{}: {}", category, value))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Singular(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Singular(value)
    }
}

impl From<Vec<String>> for Content {
    fn from(items: Vec<String>) -> Self {
        Content::Array(items)
    }
}

impl From<BTreeMap<PluralCategory, String>> for Content {
    fn from(forms: BTreeMap<PluralCategory, String>) -> Self {
        Content::Plural(forms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plural(forms: &[(PluralCategory, &str)]) -> Content {
        Content::Plural(
            forms
                .iter()
                .map(|(category, value)| (*category, value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_kind_tags_are_distinct() {
        let tags = [
            ResourceKind::String.tag(),
            ResourceKind::Array.tag(),
            ResourceKind::Plural.tag(),
        ];
        assert_eq!(tags, ["rs", "ra", "rp"]);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "string".parse::<ResourceKind>().unwrap(),
            ResourceKind::String
        );
        assert_eq!("Array".parse::<ResourceKind>().unwrap(), ResourceKind::Array);
        assert_eq!(
            "plural".parse::<ResourceKind>().unwrap(),
            ResourceKind::Plural
        );
        assert!(matches!(
            "map".parse::<ResourceKind>(),
            Err(Error::UnknownKind(_))
        ));
    }

    #[test]
    fn test_plural_category_from_str() {
        assert_eq!(
            PluralCategory::from_str("zero").unwrap(),
            PluralCategory::Zero
        );
        assert_eq!(PluralCategory::from_str("ONE").unwrap(), PluralCategory::One);
        assert_eq!(
            PluralCategory::from_str("other").unwrap(),
            PluralCategory::Other
        );
        assert_eq!(
            PluralCategory::from_str("invalid"),
            Err(Error::UnknownPluralCategory("invalid".to_string()))
        );
    }

    #[test]
    fn test_content_items_and_item() {
        let single = Content::from("Hello");
        assert_eq!(single.items(), vec!["Hello"]);
        assert_eq!(single.item(0), Some("Hello"));
        assert_eq!(single.item(1), None);

        let array = Content::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(array.kind(), ResourceKind::Array);
        assert_eq!(array.item(1), Some("b"));
        assert_eq!(array.item(2), None);

        let forms = plural(&[
            (PluralCategory::Other, "%d files"),
            (PluralCategory::One, "one file"),
        ]);
        assert_eq!(forms.items(), vec!["one file", "%d files"]);
        assert_eq!(forms.form(PluralCategory::Other), Some("%d files"));
        assert_eq!(forms.form(PluralCategory::Few), None);
    }

    #[test]
    fn test_content_compare_fields() {
        let a = Content::from(vec!["x".to_string(), "y".to_string()]);
        let b = Content::from(vec!["x".to_string(), "y".to_string()]);
        let shorter = Content::from(vec!["x".to_string()]);
        assert!(a.compare_fields(&b));
        assert!(!a.compare_fields(&shorter));
        assert!(!a.compare_fields(&Content::from("x")));
    }

    #[test]
    fn test_content_compare_plural_requires_same_categories() {
        let a = plural(&[(PluralCategory::One, "1"), (PluralCategory::Other, "n")]);
        let b = plural(&[(PluralCategory::Other, "n")]);
        assert!(!a.compare_fields(&b));
        assert!(a.compare_fields(&a.clone()));
    }

    #[test]
    fn test_content_is_empty() {
        assert!(Content::from("").is_empty());
        assert!(Content::Array(Vec::new()).is_empty());
        assert!(!Content::from(vec![String::new(), "x".to_string()]).is_empty());
    }

    #[test]
    fn test_content_display() {
        assert_eq!(Content::from("Hello").to_string(), "Hello");
        assert_eq!(
            Content::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a, b]"
        );
        assert_eq!(
            plural(&[(PluralCategory::One, "1 file")]).to_string(),
            "{one: 1 file}"
        );
    }
}
