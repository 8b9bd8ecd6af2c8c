//! The indexed resource collection.
//!
//! A [`TranslationSet`] owns its resources in insertion order and keeps three
//! lookup indices next to them:
//!
//! - hash key to resource, the authoritative identity index;
//! - clean hash key to resource, last writer wins;
//! - `source@context` to resource, for auto-keyed plain strings only.
//!
//! The indices are private and only `add`, `add_all`, `remove` and `clear`
//! touch them. The clean and source-text indices are caches: `remove` leaves
//! the clean entry in place and `clear` does not flush it. Such an entry then
//! resolves to nothing, since the record it names is gone.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    options::SetOptions,
    query::Query,
    resource::{Resource, source_text_key},
    traits::CompareFields,
    types::ResourceKind,
};

/// Stable handle of a stored record. Handles are never reused, so a stale
/// index entry can not alias a newer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot(u64);

/// An ordered, indexed collection of resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SetSnapshot", into = "SetSnapshot")]
pub struct TranslationSet {
    options: SetOptions,
    order: Vec<Slot>,
    records: HashMap<Slot, Resource>,
    /// `None` marks a removed key.
    by_hash_key: HashMap<String, Option<Slot>>,
    by_clean_key: HashMap<String, Slot>,
    by_source_text: HashMap<String, Slot>,
    next_slot: u64,
    dirty: bool,
}

impl TranslationSet {
    /// Creates an empty set with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with the given options.
    pub fn with_options(options: SetOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SetOptions {
        &self.options
    }

    pub fn source_locale(&self) -> &str {
        &self.options.source_locale
    }

    /// Adds a resource, merging it with an existing one of the same hash key.
    ///
    /// - `None` is ignored.
    /// - A new hash key is appended and indexed.
    /// - An instance of the existing resource (same text modulo whitespace)
    ///   is attached to it; the set does not grow.
    /// - A plain string differing in source, comment, state or id loses to the
    ///   existing one; the set is marked dirty but does not grow.
    /// - A plain string matching on all of those (it differs in target only)
    ///   is attached to an earlier record of that hash key it is an instance
    ///   of, or else appended, taking over the hash key.
    /// - Arrays and plurals follow the existing-wins rule.
    pub fn add(&mut self, resource: impl Into<Option<Resource>>) {
        let Some(resource) = resource.into() else {
            return;
        };

        let hash_key = resource.hash_key();
        let Some(existing) = self
            .by_hash_key
            .get(&hash_key)
            .copied()
            .flatten()
            .and_then(|slot| self.records.get_mut(&slot))
        else {
            self.insert(hash_key, resource);
            return;
        };

        if existing.is_instance(&resource) {
            let attached = existing.add_instance(resource);
            tracing::trace!(%hash_key, attached, "merged resource as instance");
            return;
        }

        match existing.kind() {
            ResourceKind::String => {
                let differs = !existing.source().compare_fields(resource.source())
                    || existing.comment() != resource.comment()
                    || existing.state() != resource.state()
                    || existing.id() != resource.id();
                if differs {
                    tracing::debug!(%hash_key, "conflicting string resource, keeping existing");
                    self.dirty = true;
                } else if let Some(slot) = self.slots_for(&hash_key).into_iter().find(|slot| {
                    self.records.get(slot).is_some_and(|r| r.is_instance(&resource))
                }) {
                    // an earlier translation of the same key
                    if let Some(earlier) = self.records.get_mut(&slot) {
                        let attached = earlier.add_instance(resource);
                        tracing::trace!(%hash_key, attached, "merged resource as instance");
                    }
                } else {
                    self.insert(hash_key, resource);
                }
            }
            ResourceKind::Array | ResourceKind::Plural => {
                tracing::debug!(
                    %hash_key,
                    kind = %existing.kind(),
                    "conflicting resource, keeping existing"
                );
                self.dirty = true;
            }
        }
    }

    /// Adds every resource in order.
    pub fn add_all<I>(&mut self, resources: I)
    where
        I: IntoIterator<Item = Resource>,
    {
        for resource in resources {
            self.add(resource);
        }
    }

    fn insert(&mut self, hash_key: String, resource: Resource) {
        let slot = Slot(self.next_slot);
        self.next_slot += 1;

        self.by_clean_key.insert(resource.clean_hash_key(), slot);
        if resource.kind() == ResourceKind::String
            && resource.auto_key()
            && let Some(text_key) = resource.source_text_key()
        {
            self.by_source_text.insert(text_key, slot);
        }
        tracing::trace!(%hash_key, "inserted resource");
        self.by_hash_key.insert(hash_key, Some(slot));
        self.order.push(slot);
        self.records.insert(slot, resource);
        self.dirty = true;
    }

    /// Slots of every record with `hash_key`, in insertion order.
    fn slots_for(&self, hash_key: &str) -> Vec<Slot> {
        self.order
            .iter()
            .copied()
            .filter(|slot| {
                self.records
                    .get(slot)
                    .is_some_and(|resource| resource.hash_key() == hash_key)
            })
            .collect()
    }

    /// Looks up a resource by its hash key.
    pub fn get(&self, hash_key: &str) -> Option<&Resource> {
        self.by_hash_key
            .get(hash_key)
            .copied()
            .flatten()
            .and_then(|slot| self.records.get(&slot))
    }

    /// Looks up a resource by its clean hash key.
    pub fn get_clean(&self, clean_hash_key: &str) -> Option<&Resource> {
        self.by_clean_key
            .get(clean_hash_key)
            .and_then(|slot| self.records.get(slot))
    }

    /// Looks up an auto-keyed plain string by its source text. `None` context
    /// is the root context.
    pub fn get_by_source_text(&self, text: &str, context: Option<&str>) -> Option<&Resource> {
        self.by_source_text
            .get(&source_text_key(text, context))
            .and_then(|slot| self.records.get(slot))
    }

    /// Iterates over all resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.order.iter().filter_map(|slot| self.records.get(slot))
    }

    /// All resources in insertion order.
    pub fn get_all(&self) -> Vec<&Resource> {
        self.iter().collect()
    }

    /// Resources matching every criterion of `query`, in insertion order.
    pub fn get_by(&self, query: &Query) -> Vec<&Resource> {
        self.iter().filter(|resource| query.matches(resource)).collect()
    }

    /// Removes the first resource matching the identity of `template`.
    ///
    /// `template` must carry a project, a context, a target locale and a key;
    /// otherwise nothing happens and `false` is returned. Matching compares
    /// project, context, source locale, target locale and key. The hash key
    /// then points at the newest remaining resource of that key, if any.
    pub fn remove(&mut self, template: &Resource) -> bool {
        if template.project().is_empty()
            || template.context().is_none_or(str::is_empty)
            || template.target_locale().is_none_or(str::is_empty)
            || template.key().is_empty()
        {
            return false;
        }

        let Some(position) = self.order.iter().position(|slot| {
            self.records.get(slot).is_some_and(|resource| {
                resource.project() == template.project()
                    && resource.context() == template.context()
                    && resource.source_locale() == template.source_locale()
                    && resource.target_locale() == template.target_locale()
                    && resource.key() == template.key()
            })
        }) else {
            return false;
        };

        let slot = self.order.remove(position);
        let Some(removed) = self.records.remove(&slot) else {
            return false;
        };
        let hash_key = removed.hash_key();
        let survivor = self.slots_for(&hash_key).pop();
        self.by_hash_key.insert(hash_key.clone(), survivor);
        if removed.kind() == ResourceKind::String
            && let Some(text_key) = removed.source_text_key()
        {
            self.by_source_text.remove(&text_key);
        }
        if let Some(slot) = survivor
            && let Some(resource) = self.records.get(&slot)
            && resource.auto_key()
            && let Some(text_key) = resource.source_text_key()
        {
            self.by_source_text.insert(text_key, slot);
        }
        tracing::debug!(%hash_key, survivor = survivor.is_some(), "removed resource");
        self.dirty = true;
        true
    }

    /// Distinct projects, sorted. `None` when the set is empty.
    pub fn get_projects(&self) -> Option<Vec<String>> {
        non_empty(self.iter().map(|resource| resource.project().to_string()))
    }

    /// Distinct contexts, optionally within one project, sorted. The root
    /// context is reported as the empty string.
    pub fn get_contexts(&self, project: Option<&str>) -> Option<Vec<String>> {
        non_empty(
            self.iter()
                .filter(|resource| project.is_none_or(|p| resource.project() == p))
                .map(|resource| resource.context().unwrap_or_default().to_string()),
        )
    }

    /// Distinct locales, optionally within one project and context, sorted.
    /// A resource counts under its target locale, or its source locale when it
    /// has none. `Some("")` selects the root context.
    pub fn get_locales(
        &self,
        project: Option<&str>,
        context: Option<&str>,
    ) -> Option<Vec<String>> {
        non_empty(
            self.iter()
                .filter(|resource| project.is_none_or(|p| resource.project() == p))
                .filter(|resource| {
                    context.is_none_or(|c| resource.context().unwrap_or_default() == c)
                })
                .map(|resource| resource.locale().to_string()),
        )
    }

    /// Drops all resources and the hash-key and source-text indices, and
    /// resets the dirty flag. The clean-key index is kept.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.order.len(), "clearing translation set");
        self.order.clear();
        self.records.clear();
        self.by_hash_key.clear();
        self.by_source_text.clear();
        self.dirty = false;
    }

    /// Resources of `other` that are new or changed relative to `self`.
    ///
    /// One-directional: resources only present in `self` are not reported. A
    /// resource is unchanged when any resource of `self` with the same hash
    /// key equals it.
    pub fn diff(&self, other: &TranslationSet) -> TranslationSet {
        let mut result = TranslationSet::with_options(self.options.clone());
        for resource in other.iter() {
            let hash_key = resource.hash_key();
            let unchanged = self.get(&hash_key).is_some_and(|r| r.equals(resource))
                || self
                    .slots_for(&hash_key)
                    .iter()
                    .filter_map(|slot| self.records.get(slot))
                    .any(|r| r.equals(resource));
            if !unchanged {
                result.add(resource.clone());
            }
        }
        result
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_clean(&mut self) {
        self.dirty = false;
    }

    /// Number of resources.
    pub fn size(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn non_empty(values: impl Iterator<Item = String>) -> Option<Vec<String>> {
    let values: BTreeSet<String> = values.collect();
    if values.is_empty() {
        None
    } else {
        Some(values.into_iter().collect())
    }
}

impl Extend<Resource> for TranslationSet {
    fn extend<T: IntoIterator<Item = Resource>>(&mut self, iter: T) {
        self.add_all(iter);
    }
}

impl FromIterator<Resource> for TranslationSet {
    fn from_iter<T: IntoIterator<Item = Resource>>(iter: T) -> Self {
        let mut set = TranslationSet::new();
        set.add_all(iter);
        set
    }
}

impl<'a> IntoIterator for &'a TranslationSet {
    type Item = &'a Resource;
    type IntoIter = Box<dyn Iterator<Item = &'a Resource> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Serialized form of a set: its options and its records in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SetSnapshot {
    source_locale: String,
    #[serde(default)]
    resources: Vec<Resource>,
}

impl From<TranslationSet> for SetSnapshot {
    fn from(mut set: TranslationSet) -> Self {
        let resources = set
            .order
            .iter()
            .filter_map(|slot| set.records.remove(slot))
            .collect();
        SetSnapshot {
            source_locale: set.options.source_locale,
            resources,
        }
    }
}

/// Rebuilds the indices by re-adding every record. The result is clean.
impl From<SetSnapshot> for TranslationSet {
    fn from(snapshot: SetSnapshot) -> Self {
        let mut set = TranslationSet::with_options(
            SetOptions::new().with_source_locale(snapshot.source_locale),
        );
        set.add_all(snapshot.resources);
        set.set_clean();
        set
    }
}
