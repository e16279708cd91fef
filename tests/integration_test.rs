/// End-to-end integration tests for chat-labels
///
/// These tests verify complete workflows: document → normalize → store → list/export
mod common;

use std::collections::BTreeSet;

use chat_labels::models::ExportDocument;
use chat_labels::parsers::coerce_timestamp;
use chat_labels::transfer::import_path;
use chat_labels::{ChatFilter, SortMode, Store, export_all, export_json, import_document};
use common::{ChatBuilder, DocumentBuilder, Shape, Workspace, strings};
use serde_json::json;

fn store_with(document: &DocumentBuilder) -> Store {
    let mut store = Store::open_in_memory().unwrap();
    import_document(&mut store, document.to_json().as_bytes()).unwrap();
    store
}

fn ids(store: &Store, filter: &ChatFilter) -> Vec<String> {
    store.list(filter).unwrap().into_iter().map(|row| row.id).collect()
}

#[test]
fn test_e2e_items_document() {
    let doc = r#"{"items": [{"id": "x", "title": "T", "messages": [{"role":"user","text":"hi"}]}]}"#;
    let mut store = Store::open_in_memory().unwrap();

    assert_eq!(import_document(&mut store, doc.as_bytes()).unwrap(), 1);

    let chat = store.get("x").unwrap().unwrap();
    assert_eq!(chat.title, "T");
    assert!(chat.content.contains("[user] hi"));
}

#[test]
fn test_e2e_reimport_without_ids_dedups() {
    let document = DocumentBuilder::new(Shape::BareList)
        .chat(ChatBuilder::new().title("Idless").created_at(json!("2024-02-02")).content("same"))
        .chat(ChatBuilder::new().content("also without id"));

    let mut store = store_with(&document);
    import_document(&mut store, document.to_json().as_bytes()).unwrap();

    assert_eq!(store.stats().unwrap().chats, 2, "Re-import must not duplicate chats");
}

#[test]
fn test_e2e_export_import_round_trip() {
    let document = DocumentBuilder::new(Shape::Chats)
        .chat(
            ChatBuilder::new()
                .id("a")
                .title("Ferris")
                .created_at(json!(1700000000))
                .model("gpt-4")
                .content("crab facts"),
        )
        .chat(ChatBuilder::new().title("No id").messages(&[("user", "hello"), ("assistant", "hi")]))
        .chat(ChatBuilder::new().id("c").title("Ünïcode").content("日本語"));
    let mut original = store_with(&document);
    original.assign(&strings(&["a", "c"]), &strings(&["work", "rust"])).unwrap();

    let json = export_json(&original).unwrap();
    let mut restored = Store::open_in_memory().unwrap();
    import_document(&mut restored, json.as_bytes()).unwrap();

    assert_eq!(original.chats().unwrap(), restored.chats().unwrap());

    let links = |store: &Store| store.links().unwrap().into_iter().collect::<BTreeSet<_>>();
    assert_eq!(links(&original), links(&restored));
}

#[test]
fn test_e2e_export_document_structure() {
    let document = DocumentBuilder::new(Shape::Chats)
        .chat(ChatBuilder::new().id("a").content("x"))
        .chat(ChatBuilder::new().id("b").content("y").categories(&["home"]));
    let store = store_with(&document);

    let exported: ExportDocument = serde_json::from_str(&export_json(&store).unwrap()).unwrap();
    assert_eq!(exported.schema_version, 1);
    assert_eq!(exported.categories, vec!["home"]);
    assert_eq!(exported.chats.len(), 2);
    assert!(exported.chats[0].categories.is_empty());
    assert_eq!(exported.chats[1].categories, vec!["home"]);
    assert_eq!(export_all(&store).unwrap().chats, exported.chats);
}

#[test]
fn test_e2e_assign_is_idempotent() {
    let document = DocumentBuilder::new(Shape::Chats)
        .chat(ChatBuilder::new().id("a").content("x"))
        .chat(ChatBuilder::new().id("b").content("y"));
    let mut store = store_with(&document);

    store.assign(&strings(&["a", "b"]), &strings(&["work", "urgent"])).unwrap();
    let once = store.links().unwrap();
    store.assign(&strings(&["a", "b"]), &strings(&["work", "urgent"])).unwrap();

    assert_eq!(store.links().unwrap(), once);
    assert_eq!(store.stats().unwrap().links, 4);
}

#[test]
fn test_e2e_category_filter_is_and_match() {
    let document = DocumentBuilder::new(Shape::Chats)
        .chat(ChatBuilder::new().id("exact").content("1").categories(&["work", "rust"]))
        .chat(ChatBuilder::new().id("superset").content("2").categories(&["work", "rust", "extra"]))
        .chat(ChatBuilder::new().id("partial").content("3").categories(&["work"]))
        .chat(ChatBuilder::new().id("none").content("4"));
    let store = store_with(&document);

    let wanted: Vec<i64> = store
        .category_ids(&strings(&["work", "rust"]))
        .unwrap()
        .into_iter()
        .map(|(_, id)| id.unwrap())
        .collect();

    let mut matched = ids(&store, &ChatFilter::new().categories(wanted).sort(SortMode::Title));
    matched.sort();
    assert_eq!(matched, vec!["exact", "superset"]);
}

#[test]
fn test_e2e_search_title_or_content_case_insensitive() {
    let document = DocumentBuilder::new(Shape::Chats)
        .chat(ChatBuilder::new().id("t").title("Borrow CHECKER tips").content("nothing"))
        .chat(ChatBuilder::new().id("c").title("Other").content("fighting the borrow checker"))
        .chat(ChatBuilder::new().id("n").title("Unrelated").content("lifetimes"));
    let store = store_with(&document);

    let matched = ids(&store, &ChatFilter::new().search("borrow checker").sort(SortMode::Title));
    assert_eq!(matched, vec!["t", "c"]);
}

#[test]
fn test_e2e_newest_order_undated_last() {
    let document = DocumentBuilder::new(Shape::Chats)
        .chat(ChatBuilder::new().id("undated").title("A").content("x"))
        .chat(ChatBuilder::new().id("older").title("B").created_at(json!("2023-06-15")).content("x"))
        .chat(ChatBuilder::new().id("newer").title("C").created_at(json!("2024-01-01")).content("x"));
    let store = store_with(&document);

    assert_eq!(ids(&store, &ChatFilter::new()), vec!["newer", "older", "undated"]);
    assert_eq!(
        ids(&store, &ChatFilter::new().sort(SortMode::Oldest)),
        vec!["older", "newer", "undated"]
    );
    assert_eq!(
        ids(&store, &ChatFilter::new().sort(SortMode::Title)),
        vec!["undated", "older", "newer"]
    );
}

#[test]
fn test_e2e_epoch_and_iso_timestamps_equivalent() {
    assert_eq!(
        coerce_timestamp(Some(&json!("1700000000"))),
        coerce_timestamp(Some(&json!("2023-11-14T22:13:20Z")))
    );
}

#[test]
fn test_e2e_import_directory_into_file_store() {
    let workspace = Workspace::new();
    workspace.write_document(
        "exports/one.json",
        &DocumentBuilder::new(Shape::Items).chat(ChatBuilder::new().id("1").content("a")),
    );
    workspace.write_document(
        "exports/nested/two.json",
        &DocumentBuilder::new(Shape::Chats)
            .chat(ChatBuilder::new().id("2").content("b").categories(&["kept"])),
    );

    {
        let mut store = Store::open(&workspace.db_path()).unwrap();
        let report = import_path(&mut store, &workspace.path().join("exports")).unwrap();
        assert_eq!(report.chats, 2);
        assert_eq!(report.files_imported, 2);
    }

    let reopened = Store::open(&workspace.db_path()).unwrap();
    assert_eq!(reopened.stats().unwrap().chats, 2);
    assert_eq!(reopened.chat_categories("2").unwrap(), vec!["kept"]);
}

#[test]
fn test_e2e_two_handles_share_one_file() {
    let workspace = Workspace::new();
    let mut writer = Store::open(&workspace.db_path()).unwrap();
    let reader = Store::open(&workspace.db_path()).unwrap();

    import_document(&mut writer, br#"[{"id": "shared", "content": "x"}]"#).unwrap();
    writer.assign(&strings(&["shared"]), &strings(&["both"])).unwrap();

    assert!(reader.get("shared").unwrap().is_some());
    assert_eq!(reader.list_categories().unwrap()[0].count, 1);
}
