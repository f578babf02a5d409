use quotetrack_core::{
    FileBackend, KvBackend, MemoryCollection, QuoteStore, QuoteValidationError, StoreError,
};

fn stores() -> Vec<(&'static str, QuoteStore, Option<tempfile::TempDir>)> {
    let dir = tempfile::tempdir().unwrap();
    let file_store = QuoteStore::with_snapshot(FileBackend::new(dir.path().join("quotes.json")));
    let kv_store = QuoteStore::with_snapshot(KvBackend::open_in_memory().unwrap());
    let remote_store = QuoteStore::with_collection(MemoryCollection::new());

    vec![
        ("file", file_store, Some(dir)),
        ("kv", kv_store, None),
        ("remote", remote_store, None),
    ]
}

#[test]
fn add_appends_trimmed_text_to_the_end() {
    for (name, mut store, _guard) in stores() {
        store.load();
        store.add("first quote").unwrap();
        let quotes = store.add("  second quote  ").unwrap();

        assert_eq!(quotes.len(), 2, "backend {name}");
        assert_eq!(quotes.last().unwrap().text, "second quote", "backend {name}");
        assert_eq!(store.list(), quotes.as_slice(), "backend {name}");
    }
}

#[test]
fn add_rejects_empty_and_whitespace_input_without_state_change() {
    for (name, mut store, _guard) in stores() {
        store.load();
        store.add("kept").unwrap();
        let before = store.list().to_vec();

        for input in ["", "   ", "\t\n"] {
            let err = store.add(input).unwrap_err();
            assert!(
                matches!(
                    err,
                    StoreError::Validation(QuoteValidationError::EmptyText)
                ),
                "backend {name}"
            );
            assert_eq!(store.list(), before.as_slice(), "backend {name}");
        }
    }
}

#[test]
fn update_changes_only_the_addressed_record() {
    for (name, mut store, _guard) in stores() {
        store.load();
        store.add("alpha").unwrap();
        let quotes = store.add("beta").unwrap();
        store.add("gamma").unwrap();
        let target = quotes[1].id.clone();

        let updated = store.update(&target, "beta, revised").unwrap();
        assert_eq!(updated.id, target, "backend {name}");
        assert_eq!(updated.text, "beta, revised", "backend {name}");

        let texts: Vec<&str> = store.list().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["alpha", "beta, revised", "gamma"], "backend {name}");
    }
}

#[test]
fn update_unknown_id_is_not_found_and_leaves_list_unchanged() {
    for (name, mut store, _guard) in stores() {
        store.load();
        store.add("only").unwrap();
        let before = store.list().to_vec();

        let ghost = quotetrack_core::QuoteId::new("no-such-record");
        let err = store.update(&ghost, "new text").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)), "backend {name}");
        assert_eq!(store.list(), before.as_slice(), "backend {name}");
    }
}

#[test]
fn update_validates_text_before_lookup() {
    for (name, mut store, _guard) in stores() {
        store.load();
        let ghost = quotetrack_core::QuoteId::new("no-such-record");

        // Empty text on an unknown id must fail validation, not lookup.
        let err = store.update(&ghost, "   ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)), "backend {name}");
    }
}

#[test]
fn delete_removes_exactly_one_record_preserving_order() {
    for (name, mut store, _guard) in stores() {
        store.load();
        store.add("one").unwrap();
        let quotes = store.add("two").unwrap();
        store.add("three").unwrap();
        let target = quotes[1].id.clone();

        let remaining = store.delete(&target).unwrap();
        assert_eq!(remaining.len(), 2, "backend {name}");

        let texts: Vec<&str> = remaining.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["one", "three"], "backend {name}");

        let err = store.delete(&target).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)), "backend {name}");
    }
}

#[test]
fn full_scenario_add_update_delete() {
    for (name, mut store, _guard) in stores() {
        store.load();

        let quotes = store.add("Be the change").unwrap();
        assert_eq!(quotes[0].text, "Be the change", "backend {name}");

        let quotes = store.add("Stay hungry").unwrap();
        let texts: Vec<&str> = quotes.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["Be the change", "Stay hungry"], "backend {name}");

        let second = quotes[1].id.clone();
        let first = quotes[0].id.clone();

        let updated = store.update(&second, "Stay hungry, stay foolish").unwrap();
        assert_eq!(updated.text, "Stay hungry, stay foolish", "backend {name}");
        assert_eq!(store.list()[0].text, "Be the change", "backend {name}");

        let remaining = store.delete(&first).unwrap();
        let texts: Vec<&str> = remaining.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["Stay hungry, stay foolish"], "backend {name}");
    }
}

#[test]
fn snapshot_mutations_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes.json");

    let kept_id;
    {
        let mut store = QuoteStore::with_snapshot(FileBackend::new(&path));
        store.load();
        let quotes = store.add("persisted").unwrap();
        store.add("doomed").unwrap();
        kept_id = quotes[0].id.clone();
        let doomed = store.list()[1].id.clone();
        store.delete(&doomed).unwrap();
    }

    let mut reopened = QuoteStore::with_snapshot(FileBackend::new(&path));
    let report = reopened.load();
    assert!(report.warning.is_none());
    assert_eq!(report.quotes.len(), 1);
    assert_eq!(report.quotes[0].id, kept_id);
    assert_eq!(report.quotes[0].text, "persisted");
}
