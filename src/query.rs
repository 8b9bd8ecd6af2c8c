//! Multi-field filters for [`TranslationSet::get_by`](crate::set::TranslationSet::get_by).
//!
//! A [`Query`] maps fields to criteria. A record matches when every field
//! matches; a field matches an exact value, or any value of a candidate list.
//! An empty candidate list matches everything, and so does an empty query.

use std::{collections::BTreeMap, str::FromStr};

use crate::{error::Error, resource::Resource};

/// Resource fields that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Project,
    /// Root context reads as the empty string.
    Context,
    SourceLocale,
    TargetLocale,
    Key,
    Kind,
    Datatype,
    State,
    Comment,
    Id,
    PathName,
    Flavor,
    /// Source text of plain strings only.
    Source,
}

impl Field {
    /// The value of this field on `resource`, as a string.
    pub fn value_of(self, resource: &Resource) -> Option<&str> {
        match self {
            Field::Project => Some(resource.project()),
            Field::Context => Some(resource.context().unwrap_or_default()),
            Field::SourceLocale => Some(resource.source_locale()),
            Field::TargetLocale => resource.target_locale(),
            Field::Key => Some(resource.key()),
            Field::Kind => Some(resource.kind().as_str()),
            Field::Datatype => resource.datatype(),
            Field::State => resource.state(),
            Field::Comment => resource.comment(),
            Field::Id => resource.id(),
            Field::PathName => resource.path_name(),
            Field::Flavor => resource.flavor(),
            Field::Source => resource.source().as_singular(),
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Field::Project),
            "context" => Ok(Field::Context),
            "sourceLocale" | "source_locale" => Ok(Field::SourceLocale),
            "targetLocale" | "target_locale" => Ok(Field::TargetLocale),
            "key" | "reskey" => Ok(Field::Key),
            "kind" | "resType" | "type" => Ok(Field::Kind),
            "datatype" => Ok(Field::Datatype),
            "state" => Ok(Field::State),
            "comment" => Ok(Field::Comment),
            "id" => Ok(Field::Id),
            "pathName" | "path_name" => Ok(Field::PathName),
            "flavor" => Ok(Field::Flavor),
            "source" => Ok(Field::Source),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}

/// What a single field must look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Exact(String),
    AnyOf(Vec<String>),
}

impl Criterion {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Criterion::Exact(expected) => value == Some(expected.as_str()),
            Criterion::AnyOf(candidates) => {
                candidates.is_empty()
                    || value.is_some_and(|value| candidates.iter().any(|c| c == value))
            }
        }
    }
}

impl From<&str> for Criterion {
    fn from(value: &str) -> Self {
        Criterion::Exact(value.to_string())
    }
}

impl From<String> for Criterion {
    fn from(value: String) -> Self {
        Criterion::Exact(value)
    }
}

impl From<Vec<String>> for Criterion {
    fn from(values: Vec<String>) -> Self {
        Criterion::AnyOf(values)
    }
}

impl From<Vec<&str>> for Criterion {
    fn from(values: Vec<&str>) -> Self {
        Criterion::AnyOf(values.into_iter().map(str::to_string).collect())
    }
}

/// A conjunction of per-field criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    criteria: BTreeMap<Field, Criterion>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `field` to satisfy `criterion`, replacing any earlier one.
    pub fn with(mut self, field: Field, criterion: impl Into<Criterion>) -> Self {
        self.criteria.insert(field, criterion.into());
        self
    }

    /// Same as [`Query::with`], naming the field by string.
    pub fn with_named(self, field: &str, criterion: impl Into<Criterion>) -> Result<Self, Error> {
        Ok(self.with(field.parse()?, criterion))
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        self.criteria
            .iter()
            .all(|(field, criterion)| criterion.matches(field.value_of(resource)))
    }
}

impl FromIterator<(Field, Criterion)> for Query {
    fn from_iter<T: IntoIterator<Item = (Field, Criterion)>>(iter: T) -> Self {
        Self {
            criteria: iter.into_iter().collect(),
        }
    }
}
