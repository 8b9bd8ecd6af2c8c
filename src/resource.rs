//! The translatable resource record and its identity keys.
//!
//! A [`Resource`] carries its identity (`project`, `context`, locales, `key`),
//! the source content, an optional target of the same shape, and bookkeeping
//! flags. Two derived strings identify it inside a
//! [`TranslationSet`](crate::set::TranslationSet):
//!
//! - the hash key, `tag_project_context_locale_key`, exact identity;
//! - the clean hash key, the same with the key run through
//!   [`clean_text`](crate::text::clean_text), for near-duplicate lookups.
//!
//! # Example
//!
//! ```rust
//! use langstore::Resource;
//!
//! let resource = Resource::builder()
//!     .project("webapp")
//!     .key("greeting")
//!     .source("Hello")
//!     .target_locale("de-DE")
//!     .target("Hallo")
//!     .build()?;
//! assert_eq!(resource.hash_key(), "rs_webapp__de-DE_greeting");
//! # Ok::<(), langstore::Error>(())
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    text::{clean_text, clean_text_preserving_case},
    traits::CompareFields,
    types::{Content, ResourceKind},
};

/// Source locale assumed when none is given.
pub const DEFAULT_SOURCE_LOCALE: &str = "en-US";

/// Builds the exact identity key. Absent parts become empty segments, so
/// positions are preserved.
pub fn hash_key_for(
    kind: ResourceKind,
    project: &str,
    context: Option<&str>,
    locale: &str,
    key: &str,
) -> String {
    [kind.tag(), project, context.unwrap_or_default(), locale, key].join("_")
}

/// Same as [`hash_key_for`] with the key normalized by [`clean_text`].
pub fn clean_hash_key_for(
    kind: ResourceKind,
    project: &str,
    context: Option<&str>,
    locale: &str,
    key: &str,
) -> String {
    hash_key_for(kind, project, context, locale, &clean_text(key))
}

/// A single translatable resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    #[serde(default)]
    project: String,

    /// `None` is the root context.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    context: Option<String>,

    source_locale: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    target_locale: Option<String>,

    key: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    datatype: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    comment: Option<String>,

    /// Explicit identifier assigned by the originating file, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    path_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    flavor: Option<String>,

    source: Content,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    target: Option<Content>,

    /// Whether `key` was derived from the source text.
    #[serde(default)]
    auto_key: bool,

    #[serde(skip)]
    dirty: bool,

    /// Cosmetically different copies of this resource seen by the set.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    instances: Vec<Resource>,
}

impl Resource {
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::new()
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    pub fn target_locale(&self) -> Option<&str> {
        self.target_locale.as_deref()
    }

    /// The locale used for identity: the target locale if set, else the source.
    pub fn locale(&self) -> &str {
        self.target_locale.as_deref().unwrap_or(&self.source_locale)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ResourceKind {
        self.source.kind()
    }

    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn path_name(&self) -> Option<&str> {
        self.path_name.as_deref()
    }

    pub fn flavor(&self) -> Option<&str> {
        self.flavor.as_deref()
    }

    pub fn source(&self) -> &Content {
        &self.source
    }

    pub fn target(&self) -> Option<&Content> {
        self.target.as_ref()
    }

    /// Source string at `index`; `None` when out of range.
    pub fn source_item(&self, index: usize) -> Option<&str> {
        self.source.item(index)
    }

    /// Target string at `index`; `None` when out of range or untranslated.
    pub fn target_item(&self, index: usize) -> Option<&str> {
        self.target.as_ref().and_then(|target| target.item(index))
    }

    pub fn auto_key(&self) -> bool {
        self.auto_key
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn instances(&self) -> &[Resource] {
        &self.instances
    }

    pub fn set_project(&mut self, project: impl Into<String>) {
        self.project = project.into();
        self.dirty = true;
    }

    pub fn set_context(&mut self, context: Option<String>) {
        self.context = context;
        self.dirty = true;
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
        self.auto_key = false;
        self.dirty = true;
    }

    pub fn set_source_locale(&mut self, locale: impl Into<String>) {
        self.source_locale = locale.into();
        self.dirty = true;
    }

    pub fn set_target_locale(&mut self, locale: Option<String>) {
        self.target_locale = locale;
        self.dirty = true;
    }

    /// Replaces the source. The shape must match the current kind.
    pub fn set_source(&mut self, source: impl Into<Content>) -> Result<(), Error> {
        let source = source.into();
        check_shape(self.kind(), &source, "source")?;
        self.source = source;
        self.dirty = true;
        Ok(())
    }

    /// Replaces the target. The shape must match the source.
    pub fn set_target(&mut self, target: impl Into<Content>) -> Result<(), Error> {
        let target = target.into();
        check_shape(self.kind(), &target, "target")?;
        self.target = Some(target);
        self.dirty = true;
        Ok(())
    }

    pub fn set_state(&mut self, state: Option<String>) {
        self.state = state;
        self.dirty = true;
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
        self.dirty = true;
    }

    pub fn set_datatype(&mut self, datatype: Option<String>) {
        self.datatype = datatype;
        self.dirty = true;
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
        self.dirty = true;
    }

    pub fn set_path_name(&mut self, path_name: Option<String>) {
        self.path_name = path_name;
        self.dirty = true;
    }

    pub fn set_flavor(&mut self, flavor: Option<String>) {
        self.flavor = flavor;
        self.dirty = true;
    }

    pub fn hash_key(&self) -> String {
        hash_key_for(
            self.kind(),
            &self.project,
            self.context(),
            self.locale(),
            &self.key,
        )
    }

    pub fn clean_hash_key(&self) -> String {
        clean_hash_key_for(
            self.kind(),
            &self.project,
            self.context(),
            self.locale(),
            &self.key,
        )
    }

    /// Key used by the source-text index: `source@context`.
    pub(crate) fn source_text_key(&self) -> Option<String> {
        self.source
            .as_singular()
            .map(|text| source_text_key(text, self.context()))
    }

    fn same_identity(&self, other: &Resource) -> bool {
        self.project == other.project
            && self.context == other.context
            && self.source_locale == other.source_locale
            && self.target_locale == other.target_locale
            && self.key == other.key
            && self.kind() == other.kind()
    }

    /// Identity fields and sources match exactly; targets are compared only
    /// when both sides carry one.
    pub fn equals(&self, other: &Resource) -> bool {
        if !self.same_identity(other) || !self.source.compare_fields(&other.source) {
            return false;
        }
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => a.compare_fields(b),
            _ => true,
        }
    }

    /// Same hash key and the same text once whitespace, escapes and entities
    /// are normalized. Case is significant. Plain strings must also agree on
    /// comment, state and id.
    pub fn is_instance(&self, other: &Resource) -> bool {
        let eq = |a: &str, b: &str| clean_text_preserving_case(a) == clean_text_preserving_case(b);
        if self.hash_key() != other.hash_key()
            || !self.source.compare_fields_with(&other.source, eq)
        {
            return false;
        }
        if self.kind() == ResourceKind::String
            && (self.comment != other.comment || self.state != other.state || self.id != other.id)
        {
            return false;
        }
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => a.compare_fields_with(b, eq),
            _ => true,
        }
    }

    /// Records `other` as an instance of this resource. Returns false when it
    /// is not an instance, or when it adds nothing new.
    pub fn add_instance(&mut self, other: Resource) -> bool {
        if !self.is_instance(&other)
            || self.equals(&other)
            || self.instances.iter().any(|instance| instance.equals(&other))
        {
            return false;
        }
        self.instances.push(other);
        self.dirty = true;
        true
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resource {{ key: {}, kind: {}, locale: {}, source: {} }}",
            self.key,
            self.kind(),
            self.locale(),
            self.source
        )
    }
}

pub(crate) fn source_text_key(text: &str, context: Option<&str>) -> String {
    format!("{}@{}", text, context.unwrap_or_default())
}

fn check_shape(kind: ResourceKind, content: &Content, what: &str) -> Result<(), Error> {
    if content.kind() == kind {
        Ok(())
    } else {
        Err(Error::DataMismatch(format!(
            "{} is {} but the resource is {}",
            what,
            content.kind(),
            kind
        )))
    }
}

/// Fluent constructor for [`Resource`].
///
/// The key may be omitted for plain strings; it is then taken from the source
/// text and the resource is marked auto-keyed.
#[derive(Debug, Clone, Default)]
pub struct ResourceBuilder {
    project: Option<String>,
    context: Option<String>,
    source_locale: Option<String>,
    target_locale: Option<String>,
    key: Option<String>,
    kind: Option<ResourceKind>,
    datatype: Option<String>,
    state: Option<String>,
    comment: Option<String>,
    id: Option<String>,
    path_name: Option<String>,
    flavor: Option<String>,
    source: Option<Content>,
    target: Option<Content>,
    auto_key: bool,
}

impl ResourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = Some(locale.into());
        self
    }

    pub fn target_locale(mut self, locale: impl Into<String>) -> Self {
        self.target_locale = Some(locale.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Only needed when no source is given; otherwise the source decides.
    pub fn kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn path_name(mut self, path_name: impl Into<String>) -> Self {
        self.path_name = Some(path_name.into());
        self
    }

    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn source(mut self, source: impl Into<Content>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn target(mut self, target: impl Into<Content>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn auto_key(mut self, auto_key: bool) -> Self {
        self.auto_key = auto_key;
        self
    }

    pub fn build(self) -> Result<Resource, Error> {
        let source = match (self.source, self.kind) {
            (Some(source), Some(kind)) => {
                check_shape(kind, &source, "source")?;
                source
            }
            (Some(source), None) => source,
            (None, kind) => empty_content(kind.unwrap_or(ResourceKind::String)),
        };
        if let Some(target) = &self.target {
            check_shape(source.kind(), target, "target")?;
        }

        let (key, auto_key) = match (self.key, source.as_singular()) {
            (Some(key), _) => (key, self.auto_key),
            (None, Some(text)) if !text.is_empty() => (text.to_string(), true),
            (None, _) => {
                return Err(Error::InvalidResource(
                    "a key is required unless the source is a non-empty string".to_string(),
                ));
            }
        };

        Ok(Resource {
            project: self.project.unwrap_or_default(),
            context: self.context.filter(|context| !context.is_empty()),
            source_locale: self
                .source_locale
                .unwrap_or_else(|| DEFAULT_SOURCE_LOCALE.to_string()),
            target_locale: self.target_locale,
            key,
            datatype: self.datatype,
            state: self.state,
            comment: self.comment,
            id: self.id,
            path_name: self.path_name,
            flavor: self.flavor,
            source,
            target: self.target,
            auto_key,
            dirty: false,
            instances: Vec::new(),
        })
    }
}

fn empty_content(kind: ResourceKind) -> Content {
    match kind {
        ResourceKind::String => Content::Singular(String::new()),
        ResourceKind::Array => Content::Array(Vec::new()),
        ResourceKind::Plural => Content::Plural(Default::default()),
    }
}
