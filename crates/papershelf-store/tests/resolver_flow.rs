//! Integration tests against a real PostgreSQL database.
//!
//! Run with:
//!   DATABASE_URL=postgres://... cargo test -p papershelf-store \
//!       --features integration-tests
//!
//! Each test uses run-unique titles, names, and bibtex keys so the suite
//! can run repeatedly against the same database.

#![cfg(feature = "integration-tests")]

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use papershelf_core::{AuthorName, PaperId, SearchOutcome};
use papershelf_store::{NewPaper, PaperField, Resolver, Store, StoreConfig, StoreError};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{tag}-{nanos}-{n}")
}

async fn connect() -> Store {
    let config = StoreConfig::from_env().expect("DATABASE_URL must be set");
    Store::connect(config).await.expect("connect failed")
}

fn new_paper(title: &str, authors: &[(&str, &str)], key: &str) -> NewPaper {
    NewPaper {
        title: title.to_string(),
        summary: Some("a test summary".to_string()),
        bibtex_key: key.to_string(),
        bib_text: format!("@article{{{key}, title={{{title}}}}}"),
        authors: authors
            .iter()
            .map(|(last, first)| AuthorName::new(*last, *first))
            .collect(),
    }
}

#[tokio::test]
async fn unknown_title_is_not_found() {
    let resolver = Resolver::new(connect().await);
    let outcome = resolver
        .search_by_title(&unique("never-stored"))
        .await
        .unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
}

#[tokio::test]
async fn single_title_match_resolves_with_ordered_authors_and_bib() {
    let store = connect().await;
    let title = unique("single");
    let key = unique("key");
    let last_a = unique("Alpha");
    let last_b = unique("Beta");
    store
        .add_paper(&new_paper(&title, &[(&last_a, "Ann"), (&last_b, "Bo")], &key))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    match resolver.search_by_title(&title).await.unwrap() {
        SearchOutcome::Resolved(paper) => {
            assert_eq!(paper.paper.title, title);
            assert_eq!(paper.bib.bibtex_key, key);
            let names: Vec<_> = paper
                .authors
                .iter()
                .map(|a| a.last_name.clone())
                .collect();
            assert_eq!(names, vec![last_a, last_b]);
        }
        other => panic!("expected Resolved, got {other:?}"),
    }
}

#[tokio::test]
async fn title_search_is_exact_and_case_sensitive() {
    let store = connect().await;
    let title = unique("Exact Title");
    store
        .add_paper(&new_paper(&title, &[("Case", "Cora")], &unique("key")))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    let lowered = resolver
        .search_by_title(&title.to_lowercase())
        .await
        .unwrap();
    assert_eq!(lowered, SearchOutcome::NotFound);
    let fragment = resolver.search_by_title(&title[..5]).await.unwrap();
    assert_eq!(fragment, SearchOutcome::NotFound);
}

#[tokio::test]
async fn shared_title_disambiguates_in_insertion_order() {
    let store = connect().await;
    let title = unique("shared");
    let last_one = unique("One");
    let last_two = unique("Two");
    let first = store
        .add_paper(&new_paper(&title, &[(&last_one, "A")], &unique("key")))
        .await
        .unwrap();
    let second = store
        .add_paper(&new_paper(&title, &[(&last_two, "B")], &unique("key")))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    let SearchOutcome::Ambiguous(d) = resolver.search_by_title(&title).await.unwrap() else {
        panic!("expected Ambiguous");
    };
    assert_eq!(d.len(), 2);
    // Ascending paper id = insertion order, stable across repeated calls.
    assert_eq!(d.select(0), Some(first));
    assert_eq!(d.select(1), Some(second));
    assert_eq!(d.select(2), None);

    // Selecting an entry resolves to the same paper as direct id lookup.
    let chosen = d.select(1).unwrap();
    let resolved = resolver.resolve_paper(chosen).await.unwrap();
    assert_eq!(resolved.paper.id, second);
    assert_eq!(resolved.authors[0].last_name, last_two);

    let SearchOutcome::Ambiguous(again) = resolver.search_by_title(&title).await.unwrap() else {
        panic!("expected Ambiguous");
    };
    assert_eq!(again, d);
}

#[tokio::test]
async fn author_query_is_whitespace_insensitive_around_the_comma() {
    let store = connect().await;
    let last = unique("Spacey");
    store
        .add_paper(&new_paper(&unique("ws"), &[(&last, "Jane")], &unique("key")))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    let tight = resolver
        .search_by_author(&format!("{last},Jane"))
        .await
        .unwrap();
    let padded = resolver
        .search_by_author(&format!(" {last} , Jane "))
        .await
        .unwrap();
    assert!(matches!(tight, SearchOutcome::Resolved(_)));
    assert_eq!(tight, padded);

    // No comma at all is a user-input error, not a crash.
    let err = resolver
        .search_by_author(&format!("{last} Jane"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        papershelf_store::ResolveError::Input(_)
    ));
}

#[tokio::test]
async fn second_author_is_still_searchable() {
    let store = connect().await;
    let title = unique("second-author");
    let lead = unique("Lead");
    let second = unique("Second");
    store
        .add_paper(&new_paper(
            &title,
            &[(&lead, "Lana"), (&second, "Sam")],
            &unique("key"),
        ))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    match resolver
        .search_by_author(&format!("{second}, Sam"))
        .await
        .unwrap()
    {
        SearchOutcome::Resolved(paper) => assert_eq!(paper.paper.title, title),
        other => panic!("expected Resolved, got {other:?}"),
    }
}

#[tokio::test]
async fn author_with_multiple_papers_disambiguates_by_title() {
    let store = connect().await;
    let last = unique("Prolific");
    let title_a = unique("paper-a");
    let title_b = unique("paper-b");
    let id_a = store
        .add_paper(&new_paper(&title_a, &[(&last, "Pat")], &unique("key")))
        .await
        .unwrap();
    store
        .add_paper(&new_paper(&title_b, &[(&last, "Pat")], &unique("key")))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    let SearchOutcome::Ambiguous(d) = resolver
        .search_by_author(&format!("{last}, Pat"))
        .await
        .unwrap()
    else {
        panic!("expected Ambiguous");
    };
    assert_eq!(d.len(), 2);
    assert_eq!(d.select(0), Some(id_a));
    let titles: Vec<_> = d
        .candidates()
        .iter()
        .map(|c| c.paper.title.clone())
        .collect();
    assert_eq!(titles, vec![title_a, title_b]);
}

#[tokio::test]
async fn existing_author_row_is_reused_not_duplicated() {
    let store = connect().await;
    let last = unique("Reused");
    let name = AuthorName::new(last.clone(), "Rita");
    store
        .add_paper(&new_paper(&unique("r1"), &[(&last, "Rita")], &unique("key")))
        .await
        .unwrap();
    let first_id = store.author_by_name(&name).await.unwrap().unwrap().id;

    store
        .add_paper(&new_paper(&unique("r2"), &[(&last, "Rita")], &unique("key")))
        .await
        .unwrap();
    let second_id = store.author_by_name(&name).await.unwrap().unwrap().id;

    assert_eq!(first_id, second_id);
}

#[tokio::test]
async fn failed_add_rolls_back_completely() {
    let store = connect().await;
    let key = unique("key");
    store
        .add_paper(&new_paper(&unique("ok"), &[("Rollback", "Rob")], &key))
        .await
        .unwrap();

    // Reusing the bibtex key fails mid-sequence; nothing of the second
    // attempt may survive.
    let title = unique("doomed");
    let orphan = unique("Orphan");
    let err = store
        .add_paper(&new_paper(&title, &[(&orphan, "Olla")], &key))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateBibKey(_)));
    assert!(err.is_integrity_violation());

    assert!(store.papers_by_title(&title).await.unwrap().is_empty());
    assert!(store
        .author_by_name(&AuthorName::new(orphan, "Olla"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn double_listed_author_is_rejected_before_any_write() {
    let store = connect().await;
    let last = unique("Twice");
    let title = unique("dup-author");
    let err = store
        .add_paper(&new_paper(
            &title,
            &[(&last, "Tom"), (&last, "Tom")],
            &unique("key"),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RepeatedAuthor(_)));
    assert!(err.is_integrity_violation());
    assert!(store.papers_by_title(&title).await.unwrap().is_empty());

    // The same rule applies when replacing an author list.
    let id = store
        .add_paper(&new_paper(&unique("ok"), &[(&last, "Tom")], &unique("key")))
        .await
        .unwrap();
    let err = store
        .set_paper_authors(
            id,
            &[
                AuthorName::new(last.clone(), "Tom"),
                AuthorName::new(last.clone(), "Tom"),
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RepeatedAuthor(_)));
    // The original single-author listing is untouched.
    let authors = store.authors_for_paper(id).await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].last_name, last);
}

#[tokio::test]
async fn update_paper_and_bib_round_trip() {
    let store = connect().await;
    let title = unique("updatable");
    let id = store
        .add_paper(&new_paper(&title, &[("Upd", "Uma")], &unique("key")))
        .await
        .unwrap();

    store
        .update_paper(id, PaperField::Summary, "revised summary")
        .await
        .unwrap();
    let new_bib = format!("@misc{{{}}}", unique("rev"));
    store.update_bib(id, &new_bib).await.unwrap();

    let resolver = Resolver::new(store);
    let paper = resolver.resolve_paper(id).await.unwrap();
    assert_eq!(paper.paper.summary.as_deref(), Some("revised summary"));
    assert_eq!(paper.bib.raw_text, new_bib);
}

#[tokio::test]
async fn rename_onto_existing_author_is_rejected() {
    let store = connect().await;
    let last_a = unique("Taken");
    let last_b = unique("Renamed");
    store
        .add_paper(&new_paper(
            &unique("two-authors"),
            &[(&last_a, "Tia"), (&last_b, "Ray")],
            &unique("key"),
        ))
        .await
        .unwrap();
    let victim = store
        .author_by_name(&AuthorName::new(last_b.clone(), "Ray"))
        .await
        .unwrap()
        .unwrap();

    let err = store
        .rename_author(victim.author_id(), &AuthorName::new(last_a, "Tia"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateAuthor(_)));

    // The victim is unchanged.
    let still_there = store
        .author_by_name(&AuthorName::new(last_b, "Ray"))
        .await
        .unwrap();
    assert!(still_there.is_some());
}

#[tokio::test]
async fn replacing_author_list_preserves_order_and_cleans_orphans() {
    let store = connect().await;
    let sole = unique("Sole");
    let stay_a = unique("StayA");
    let stay_b = unique("StayB");
    let id = store
        .add_paper(&new_paper(&unique("relist"), &[(&sole, "Sol")], &unique("key")))
        .await
        .unwrap();

    store
        .set_paper_authors(
            id,
            &[
                AuthorName::new(stay_b.clone(), "B"),
                AuthorName::new(stay_a.clone(), "A"),
            ],
        )
        .await
        .unwrap();

    let authors = store.authors_for_paper(id).await.unwrap();
    let names: Vec<_> = authors.iter().map(|a| a.last_name.clone()).collect();
    assert_eq!(names, vec![stay_b, stay_a]);

    // The replaced sole author had no other paper and is gone.
    let orphan = store
        .author_by_name(&AuthorName::new(sole, "Sol"))
        .await
        .unwrap();
    assert!(orphan.is_none());
}

#[tokio::test]
async fn add_then_search_returns_supplied_order() {
    let store = connect().await;
    let title = unique("ordered");
    let lasts: Vec<String> = (0..4).map(|i| unique(&format!("Ord{i}"))).collect();
    let authors: Vec<(&str, &str)> = lasts.iter().map(|l| (l.as_str(), "X")).collect();
    store
        .add_paper(&new_paper(&title, &authors, &unique("key")))
        .await
        .unwrap();

    let resolver = Resolver::new(store);
    let SearchOutcome::Resolved(paper) = resolver.search_by_title(&title).await.unwrap() else {
        panic!("expected Resolved");
    };
    let got: Vec<_> = paper.authors.iter().map(|a| a.last_name.clone()).collect();
    assert_eq!(got, lasts);
}

#[tokio::test]
async fn resolving_unknown_id_reports_not_found() {
    let resolver = Resolver::new(connect().await);
    let err = resolver.resolve_paper(PaperId(i64::MAX)).await.unwrap_err();
    assert!(matches!(err, StoreError::PaperNotFound(_)));
}
