//! Segment-level translation units for translation memories.
//!
//! A [`TranslationUnit`] is one source segment with any number of
//! [`TranslationVariant`]s, one per locale and distinct string. Units are
//! independent of any [`TranslationSet`](crate::TranslationSet); variants and
//! properties only ever grow.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    resource::Resource,
    text::stable_hash,
    types::{Content, ResourceKind},
};

/// One locale's rendering of a unit's segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TranslationVariant {
    pub locale: String,
    pub string: String,
}

impl TranslationVariant {
    pub fn new(locale: impl Into<String>, string: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            string: string.into(),
        }
    }

    /// Dedup key: `stable_hash(string)_locale`.
    pub fn hash_key(&self) -> String {
        format!("{}_{}", stable_hash(&self.string), self.locale)
    }
}

/// Constructor input for [`TranslationUnit`]. `source` and `source_locale`
/// are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UnitFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
}

impl UnitFields {
    /// Fields with the two required values set.
    pub fn new(source: impl Into<String>, source_locale: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            source_locale: Some(source_locale.into()),
            ..Self::default()
        }
    }
}

/// A source segment and its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UnitRecord", into = "UnitRecord")]
pub struct TranslationUnit {
    fields: UnitFields,
    source: String,
    source_locale: String,
    variants: Vec<TranslationVariant>,
    variant_keys: HashSet<String>,
    properties: HashMap<String, String>,
}

impl TranslationUnit {
    /// Creates a unit. Fails with [`Error::MissingFields`] naming every
    /// required field that is absent or empty.
    pub fn new(fields: UnitFields) -> Result<Self, Error> {
        let source = fields.source.clone().filter(|s| !s.is_empty());
        let source_locale = fields.source_locale.clone().filter(|s| !s.is_empty());
        let (source, source_locale) = match (source, source_locale) {
            (Some(source), Some(source_locale)) => (source, source_locale),
            (source, source_locale) => {
                let missing = [
                    ("source", source.is_none()),
                    ("source_locale", source_locale.is_none()),
                ];
                return Err(Error::missing_fields(
                    missing
                        .into_iter()
                        .filter_map(|(name, absent)| absent.then_some(name)),
                ));
            }
        };

        Ok(Self {
            fields,
            source,
            source_locale,
            variants: Vec::new(),
            variant_keys: HashSet::new(),
            properties: HashMap::new(),
        })
    }

    /// Builds one unit per source string of `resource`: one for a plain
    /// string, one per array element, one per plural category. Each unit gets
    /// a source-locale variant, plus a target-locale variant when the resource
    /// has a non-empty translation for that string. Empty source strings are
    /// skipped.
    pub fn from_resource(resource: &Resource) -> Result<Vec<TranslationUnit>, Error> {
        let pairs: Vec<(&str, Option<&str>)> = match resource.source() {
            Content::Singular(source) => vec![(source.as_str(), resource.target_item(0))],
            Content::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, source)| (source.as_str(), resource.target_item(index)))
                .collect(),
            Content::Plural(forms) => forms
                .iter()
                .map(|(category, source)| {
                    (
                        source.as_str(),
                        resource.target().and_then(|target| target.form(*category)),
                    )
                })
                .collect(),
        };

        let mut units = Vec::with_capacity(pairs.len());
        for (source, target) in pairs {
            if source.is_empty() {
                continue;
            }
            let target = target.filter(|t| !t.is_empty());
            let mut unit = TranslationUnit::new(UnitFields {
                key: Some(resource.key().to_string()),
                file: resource.path_name().map(str::to_string),
                project: Some(resource.project().to_string()).filter(|p| !p.is_empty()),
                target: target.map(str::to_string),
                target_locale: resource.target_locale().map(str::to_string),
                kind: Some(resource.kind()),
                state: resource.state().map(str::to_string),
                comment: resource.comment().map(str::to_string),
                datatype: resource.datatype().map(str::to_string),
                flavor: resource.flavor().map(str::to_string),
                ..UnitFields::new(source, resource.source_locale())
            })?;
            unit.add_variant(TranslationVariant::new(resource.source_locale(), source));
            if let (Some(target), Some(locale)) = (target, resource.target_locale()) {
                unit.add_variant(TranslationVariant::new(locale, target));
            }
            units.push(unit);
        }
        tracing::trace!(key = resource.key(), count = units.len(), "built translation units");
        Ok(units)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    pub fn key(&self) -> Option<&str> {
        self.fields.key.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.fields.file.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.fields.project.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.fields.target.as_deref()
    }

    pub fn target_locale(&self) -> Option<&str> {
        self.fields.target_locale.as_deref()
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        self.fields.kind
    }

    pub fn state(&self) -> Option<&str> {
        self.fields.state.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.fields.comment.as_deref()
    }

    pub fn datatype(&self) -> Option<&str> {
        self.fields.datatype.as_deref()
    }

    pub fn flavor(&self) -> Option<&str> {
        self.fields.flavor.as_deref()
    }

    /// Key for deduplicating units across files:
    /// `stable_hash(source)_sourceLocale_datatype`.
    pub fn hash_key(&self) -> String {
        format!(
            "{}_{}_{}",
            stable_hash(&self.source),
            self.source_locale,
            self.datatype().unwrap_or_default()
        )
    }

    /// Adds a variant unless one with the same string and locale exists.
    /// `None` and variants without a locale are ignored.
    pub fn add_variant(&mut self, variant: impl Into<Option<TranslationVariant>>) -> bool {
        let Some(variant) = variant.into().filter(|v| !v.locale.is_empty()) else {
            return false;
        };
        if !self.variant_keys.insert(variant.hash_key()) {
            return false;
        }
        self.variants.push(variant);
        true
    }

    pub fn add_variants<I>(&mut self, variants: I)
    where
        I: IntoIterator<Item = TranslationVariant>,
    {
        for variant in variants {
            self.add_variant(variant);
        }
    }

    /// Variants in insertion order, optionally only those for `locale`.
    pub fn get_variants(&self, locale: Option<&str>) -> Vec<&TranslationVariant> {
        self.variants
            .iter()
            .filter(|variant| locale.is_none_or(|l| variant.locale == l))
            .collect()
    }

    /// Distinct variant locales, sorted.
    pub fn variant_locales(&self) -> Vec<&str> {
        self.variants
            .iter()
            .map(|variant| variant.locale.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Merges properties into the unit. Empty values are skipped; others
    /// overwrite.
    pub fn add_properties<I, K, V>(&mut self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in properties {
            let value = value.into();
            if !value.is_empty() {
                self.properties.insert(name.into(), value);
            }
        }
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// Serialized form of a unit.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UnitRecord {
    #[serde(flatten)]
    fields: UnitFields,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    variants: Vec<TranslationVariant>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    properties: HashMap<String, String>,
}

impl TryFrom<UnitRecord> for TranslationUnit {
    type Error = Error;

    fn try_from(record: UnitRecord) -> Result<Self, Self::Error> {
        let mut unit = TranslationUnit::new(record.fields)?;
        unit.add_variants(record.variants);
        unit.add_properties(record.properties);
        Ok(unit)
    }
}

impl From<TranslationUnit> for UnitRecord {
    fn from(unit: TranslationUnit) -> Self {
        UnitRecord {
            fields: unit.fields,
            variants: unit.variants,
            properties: unit.properties,
        }
    }
}
