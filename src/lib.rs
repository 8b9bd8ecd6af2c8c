#![forbid(unsafe_code)]
//! Indexed translation sets for localization pipelines.
//!
//! The crate models translatable resources (plain strings, string arrays and
//! plural forms), gives each a stable identity, and stores them in a
//! [`TranslationSet`] that can be queried, merged and diffed. A smaller
//! segment model, [`TranslationUnit`], serves translation memories.
//!
//! # Quick Start
//!
//! ```rust
//! use langstore::{Field, Query, Resource, TranslationSet};
//!
//! let mut set = TranslationSet::new();
//! set.add(
//!     Resource::builder()
//!         .project("webapp")
//!         .key("greeting")
//!         .source("Hello")
//!         .target_locale("de-DE")
//!         .target("Hallo")
//!         .build()?,
//! );
//!
//! let german = set.get_by(&Query::new().with(Field::TargetLocale, "de-DE"));
//! assert_eq!(german.len(), 1);
//! assert_eq!(set.get("rs_webapp__de-DE_greeting").unwrap().target_item(0), Some("Hallo"));
//! # Ok::<(), langstore::Error>(())
//! ```
//!
//! # Identity
//!
//! - **Hash key**: `tag_project_context_locale_key`, with `rs`, `ra` or `rp`
//!   as the tag and the target locale (or the source locale) as the locale.
//! - **Clean hash key**: the same with the key normalized by [`clean_text`].
//! - **Stable hash**: [`stable_hash`] gives the persisted `r<digits>` token
//!   used to key translation units and variants.

pub mod error;
pub mod options;
pub mod query;
pub mod resource;
pub mod set;
pub mod text;
pub mod traits;
pub mod types;
pub mod unit;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    options::SetOptions,
    query::{Criterion, Field, Query},
    resource::{DEFAULT_SOURCE_LOCALE, Resource, ResourceBuilder, clean_hash_key_for, hash_key_for},
    set::TranslationSet,
    text::{clean_text, stable_hash},
    traits::CompareFields,
    types::{Content, PluralCategory, ResourceKind},
    unit::{TranslationUnit, TranslationVariant, UnitFields},
};
