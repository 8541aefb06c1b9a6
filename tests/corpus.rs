//! End-to-end checks over the embedded corpus: every record loads, passes
//! validation, and the store operations behave on real data.

use healthnav::store::{DirSource, Store, TagKind};
use healthnav::validate::{has_errors, validate_corpus, Severity};

#[tokio::test]
async fn builtin_corpus_loads_and_is_clean() {
    let store = Store::builtin().await.unwrap();
    assert_eq!(store.len(), 10);

    let issues = validate_corpus(&store);
    let errors: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .collect();
    assert!(errors.is_empty(), "corpus has validation errors: {:?}", errors);
    assert!(!has_errors(&issues));
}

#[tokio::test]
async fn healthcare_system_basics_reads_at_level_one() {
    let store = Store::builtin().await.unwrap();

    let level = store.get_level("topic-healthcare-system-basics", 1).unwrap();
    assert!(
        level.summary.starts_with("The healthcare system is like a big team"),
        "unexpected level-1 summary: {}",
        level.summary
    );
    assert_eq!(level.level, 1);
}

#[tokio::test]
async fn levels_beyond_the_maximum_are_absent() {
    let store = Store::builtin().await.unwrap();

    assert!(store.get_level("topic-healthcare-system-basics", 5).is_some());
    assert!(store.get_level("topic-healthcare-system-basics", 6).is_none());
    assert!(store.get_level("topic-healthcare-system-basics", 0).is_none());
}

#[tokio::test]
async fn fqhc_topic_tag_finds_community_health_centers() {
    let store = Store::builtin().await.unwrap();

    let hits = store.list_by_tag(TagKind::Topics, "FQHCs");
    assert!(hits.iter().any(|r| r.id == "topic-community-health-centers"));

    // Tag matching is case-insensitive
    let hits = store.list_by_tag(TagKind::Topics, "fqhcs");
    assert!(hits.iter().any(|r| r.id == "topic-community-health-centers"));
}

#[tokio::test]
async fn every_cross_reference_in_the_corpus_resolves() {
    let store = Store::builtin().await.unwrap();

    for record in store.iter() {
        let resolved = store.resolve_cross_references(&record.id).unwrap();
        for entry in &resolved {
            assert!(
                entry.is_resolved(),
                "{} has a dangling reference to {}",
                record.id,
                entry.reference.target_id
            );
        }
    }
}

#[tokio::test]
async fn system_basics_links_to_insurance_basics() {
    let store = Store::builtin().await.unwrap();

    let resolved = store
        .resolve_cross_references("topic-healthcare-system-basics")
        .unwrap();
    let insurance = resolved
        .iter()
        .find(|e| e.reference.target_id == "topic-insurance-basics")
        .expect("missing reference to topic-insurance-basics");

    assert!(insurance.is_resolved());
    assert_eq!(insurance.target.unwrap().id, "topic-insurance-basics");
}

#[tokio::test]
async fn unknown_ids_are_typed_absence() {
    let store = Store::builtin().await.unwrap();

    assert!(store.get_by_id("topic-nonexistent").is_none());
    assert!(store.get_level("topic-nonexistent", 1).is_none());
    assert!(store.resolve_cross_references("topic-nonexistent").is_none());
}

#[tokio::test]
async fn search_spans_names_and_aliases() {
    let store = Store::builtin().await.unwrap();

    let hits = store.search("insurance");
    assert!(hits.iter().any(|r| r.id == "topic-insurance-basics"));

    // "COPD" appears only as an alternate name
    let hits = store.search("copd");
    assert!(hits.iter().any(|r| r.id == "condition-obstructive-lung-disease"));

    assert!(store.search("zzzz-no-such-topic").is_empty());
}

#[tokio::test]
async fn records_survive_a_serialization_round_trip() {
    let store = Store::builtin().await.unwrap();
    let original = store.get_by_id("topic-insurance-basics").unwrap();

    let json = serde_json::to_string(original).unwrap();
    let reparsed: healthnav::EducationalContent = serde_json::from_str(&json).unwrap();

    assert_eq!(reparsed.id, original.id);
    assert_eq!(reparsed.name, original.name);
    assert_eq!(reparsed.levels.len(), original.levels.len());
    assert_eq!(reparsed.version, original.version);
    assert_eq!(
        reparsed.levels.get(&1).unwrap().summary,
        original.levels.get(&1).unwrap().summary
    );
    assert_eq!(reparsed.cross_references.len(), original.cross_references.len());
}

#[tokio::test]
async fn content_directory_matches_the_embedded_corpus() {
    // The source documents the corpus is compiled from
    let store = Store::from_source(&DirSource::new("content")).await.unwrap();
    let builtin = Store::builtin().await.unwrap();

    assert_eq!(store.len(), builtin.len());
    for record in builtin.iter() {
        assert!(
            store.get_by_id(&record.id).is_some(),
            "content/ is missing {}",
            record.id
        );
    }
}
