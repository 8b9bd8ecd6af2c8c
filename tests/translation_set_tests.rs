use langstore::{
    Content, Field, PluralCategory, Query, Resource, ResourceBuilder, ResourceKind, SetOptions,
    TranslationSet, TranslationUnit,
};

fn base() -> ResourceBuilder {
    Resource::builder()
        .project("foo")
        .context("ctx")
        .key("asdf")
        .source("This is a test")
        .target_locale("de-DE")
}

fn build(builder: ResourceBuilder) -> Resource {
    builder.build().expect("valid resource")
}

#[test]
fn test_single_record_scenario() {
    let mut set = TranslationSet::new();
    let res = build(
        Resource::builder()
            .project("foo")
            .key("asdf")
            .source("This is a test"),
    );
    assert_eq!(res.source_locale(), "en-US");

    set.add(res.clone());
    assert_eq!(set.size(), 1);
    assert!(set.is_dirty());

    set.add(res);
    assert_eq!(set.size(), 1);
    assert!(set.is_dirty());
}

#[test]
fn test_round_trip_through_get() {
    let mut set = TranslationSet::new();
    let res = build(base().target("Dies ist ein Test").comment("greeting"));
    set.add(res.clone());

    let stored = set.get(&res.hash_key()).expect("stored");
    assert!(stored.equals(&res));
    assert_eq!(stored.comment(), Some("greeting"));
}

#[test]
fn test_merge_rules() {
    let mut set = TranslationSet::new();
    set.add(build(base().target("Test").state("new").id("1")));
    set.set_clean();

    // differing comment, source, state or id: existing wins
    for conflicting in [
        base().target("X").state("new").id("1").comment("changed"),
        base().target("X").state("translated").id("1"),
        base().target("X").state("new").id("2"),
        base().source("Another test").target("X").state("new").id("1"),
    ] {
        set.add(build(conflicting));
        assert_eq!(set.size(), 1);
        assert!(set.is_dirty());
        set.set_clean();
    }

    // identical metadata with another translation: appended
    set.add(build(base().target("Prüfung").state("new").id("1")));
    assert_eq!(set.size(), 2);

    // same source for another target locale: a new resource
    set.add(build(
        base()
            .target_locale("fr-FR")
            .target("Ceci est un test")
            .state("new")
            .id("1"),
    ));
    assert_eq!(set.size(), 3);
}

#[test]
fn test_merge_rules_untranslated_metadata() {
    let untranslated = || {
        Resource::builder()
            .project("foo")
            .key("asdf")
            .source("This is a test")
    };
    let mut set = TranslationSet::new();
    set.add(build(untranslated().state("new")));
    set.set_clean();

    for conflicting in [
        untranslated().state("new").comment("changed"),
        untranslated().state("translated"),
        untranslated().state("new").id("2"),
    ] {
        set.add(build(conflicting));
        assert_eq!(set.size(), 1);
        assert!(set.is_dirty());
        set.set_clean();
    }

    let stored = set.get_all()[0];
    assert_eq!(stored.state(), Some("new"));
    assert_eq!(stored.comment(), None);
    assert_eq!(stored.id(), None);
}

#[test]
fn test_appended_translation_survives_remove_and_self_diff() {
    let mut set = TranslationSet::new();
    set.add(build(base().target("Test")));
    set.add(build(base().target("Pruefung")));
    assert_eq!(set.size(), 2);
    assert_eq!(set.diff(&set).size(), 0);

    assert!(set.remove(&build(base())));
    assert_eq!(set.size(), 1);
    let hash_key = build(base()).hash_key();
    assert_eq!(set.get(&hash_key).and_then(|r| r.target_item(0)), Some("Pruefung"));
}

#[test]
fn test_get_by_preserves_order() {
    let mut set = TranslationSet::new();
    let locales = ["de-DE", "fr-FR", "de-DE", "it-IT", "fr-FR"];
    for (index, locale) in locales.iter().enumerate() {
        set.add(build(
            base()
                .key(format!("key{}", index))
                .target_locale(*locale)
                .target(format!("t{}", index)),
        ));
    }

    let all: Vec<&str> = set.get_by(&Query::new()).iter().map(|r| r.key()).collect();
    assert_eq!(all, ["key0", "key1", "key2", "key3", "key4"]);

    let some: Vec<&str> = set
        .get_by(&Query::new().with(Field::TargetLocale, vec!["fr-FR", "it-IT"]))
        .iter()
        .map(|r| r.key())
        .collect();
    assert_eq!(some, ["key1", "key3", "key4"]);

    let named = Query::new()
        .with_named("targetLocale", "de-DE")
        .and_then(|q| q.with_named("project", "foo"))
        .expect("known fields");
    assert_eq!(set.get_by(&named).len(), 2);
}

#[test]
fn test_diff_overlapping_sets() {
    let a: TranslationSet = vec![
        build(base().key("one").target("eins")),
        build(base().key("two").target("zwei")),
        build(base().key("three").target("drei")),
    ]
    .into_iter()
    .collect();
    let b: TranslationSet = vec![
        build(base().key("two").target("zwei")),
        build(base().key("three").target("DREI")),
        build(base().key("four").target("vier")),
    ]
    .into_iter()
    .collect();

    let diff = a.diff(&b);
    let keys: Vec<&str> = diff.iter().map(|r| r.key()).collect();
    assert_eq!(keys, ["three", "four"]);
    assert_eq!(diff.iter().next().unwrap().target_item(0), Some("DREI"));

    assert_eq!(a.diff(&a).size(), 0);
    assert_eq!(b.diff(&b).size(), 0);
}

#[test]
fn test_diff_untranslated_counts_as_equal() {
    let a: TranslationSet = vec![build(base().target("Test"))].into_iter().collect();
    let b: TranslationSet = vec![build(base())].into_iter().collect();
    assert_eq!(a.diff(&b).size(), 0);
}

#[test]
fn test_remove_requires_every_identity_field() {
    let mut set = TranslationSet::new();
    set.add(build(base()));
    set.set_clean();

    for incomplete in [
        base().project(""),
        Resource::builder()
            .project("foo")
            .key("asdf")
            .source("This is a test")
            .target_locale("de-DE"),
        Resource::builder()
            .project("foo")
            .context("ctx")
            .key("asdf")
            .source("This is a test"),
        base().key(""),
    ] {
        assert!(!set.remove(&build(incomplete)));
        assert_eq!(set.size(), 1);
        assert!(!set.is_dirty());
    }

    assert!(!set.remove(&build(base().source_locale("en-GB"))));
    assert!(set.remove(&build(base())));
    assert_eq!(set.size(), 0);
    assert!(set.is_dirty());
}

#[test]
fn test_remove_ignores_source_and_kind() {
    let mut set = TranslationSet::new();
    set.add(build(
        base()
            .key("colors")
            .source(vec!["red".to_string(), "green".to_string()]),
    ));
    // a template only needs the identity fields
    let template = build(base().key("colors").kind(ResourceKind::String).source(""));
    assert!(set.remove(&template));
    assert!(set.is_empty());
}

#[test]
fn test_options_carry_into_diff() {
    let mut set = TranslationSet::with_options(SetOptions::new().with_source_locale("fr-FR"));
    set.add(build(base().source_locale("fr-FR")));
    let diff = set.diff(&TranslationSet::new());
    assert_eq!(diff.source_locale(), "fr-FR");
    assert!(diff.is_empty());
}

#[test]
fn test_serde_round_trip_rebuilds_indices() {
    let mut set = TranslationSet::with_options(SetOptions::new().with_source_locale("en-GB"));
    set.add(build(base().key("b").target("B")));
    set.add(build(Resource::builder().source("Save file").source_locale("en-GB")));
    set.add(build(
        base().key("files").source(Content::Plural(
            [
                (PluralCategory::One, "one file".to_string()),
                (PluralCategory::Other, "%d files".to_string()),
            ]
            .into_iter()
            .collect(),
        )),
    ));

    let json = serde_json::to_string(&set).expect("serialize");
    let restored: TranslationSet = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.size(), 3);
    assert!(!restored.is_dirty());
    assert_eq!(restored.source_locale(), "en-GB");
    let keys: Vec<&str> = restored.iter().map(|r| r.key()).collect();
    assert_eq!(keys, ["b", "Save file", "files"]);
    assert!(restored.get_by_source_text("Save file", None).is_some());
    for original in set.iter() {
        assert!(restored.get(&original.hash_key()).unwrap().equals(original));
    }
}

#[test]
fn test_units_from_set() {
    let set: TranslationSet = vec![
        build(base().key("a").source("Open").target("Öffnen")),
        build(base().key("b").source("Close").target("Schließen")),
    ]
    .into_iter()
    .collect();

    let mut units = Vec::new();
    for resource in &set {
        units.extend(TranslationUnit::from_resource(resource).expect("valid units"));
    }
    assert_eq!(units.len(), 2);
    assert_eq!(units[1].get_variants(Some("de-DE"))[0].string, "Schließen");
}

#[test]
fn test_unit_serde_round_trip() {
    let resource = build(base().target("Dies ist ein Test"));
    let mut unit = TranslationUnit::from_resource(&resource)
        .expect("valid units")
        .remove(0);
    unit.add_properties([("x-origin", "import")]);

    let json = serde_json::to_string(&unit).expect("serialize");
    let restored: TranslationUnit = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, unit);
    assert_eq!(restored.hash_key(), unit.hash_key());

    let err = serde_json::from_str::<TranslationUnit>(r#"{"source":"x"}"#).unwrap_err();
    assert!(err.to_string().contains("source_locale"));
}
