mod common;

use std::collections::BTreeMap;

use quizpoll::{
    db::{CellUpdate, DocumentKind, Inaccessible},
    services::SheetStore,
};

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn migrations_are_recorded() {
    let db = common::create_test_db().await;
    assert!(db.migration_applied("V1").await.unwrap());
}

#[tokio::test]
async fn workbook_lists_sheets_in_order() {
    let db = common::create_seeded_db().await;

    let workbook = db.workbook("rivers").await.unwrap();
    assert_eq!(workbook.title, "[Q] Rivers");
    assert_eq!(workbook.sheet_ids, ["questions", "meta", "board", "stats"]);
}

#[tokio::test]
async fn unknown_document_is_inaccessible() {
    let db = common::create_seeded_db().await;

    let err = db.workbook("missing").await.unwrap_err();
    assert!(err.downcast_ref::<Inaccessible>().is_some());

    let err = db.cells("rivers", "missing").await.unwrap_err();
    assert!(err.downcast_ref::<Inaccessible>().is_some());

    // folders are not spreadsheets
    assert!(db.workbook("geo").await.is_err());
}

#[tokio::test]
async fn collection_lists_children() {
    let db = common::create_seeded_db().await;

    let entries = db.collection("root").await.unwrap();
    let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["geo", "feedback", "broken", "rivers"]);
    assert_eq!(entries[0].kind, DocumentKind::Folder);

    assert!(db.collection("geo").await.unwrap().is_empty());
    assert!(db.collection("nowhere").await.is_err());
}

#[tokio::test]
async fn cells_skip_blank_values() {
    let db = common::create_seeded_db().await;

    let cells = db.cells("feedback", "questions").await.unwrap();
    assert_eq!(cells[0].value, "Question");
    assert!(cells.iter().all(|c| !c.value.is_empty()));
    assert!(!cells.iter().any(|c| c.row == 2 && c.col == 2));
}

#[tokio::test]
async fn write_cells_upserts_and_clears() {
    let db = common::create_seeded_db().await;

    db.write_cells(
        "rivers",
        "stats",
        vec![
            CellUpdate {
                row: 2,
                col: 1,
                value: "Longest river?".to_string(),
            },
            CellUpdate {
                row: 1,
                col: 4,
                value: String::new(),
            },
        ],
    )
    .await
    .unwrap();

    let cells = db.cells("rivers", "stats").await.unwrap();
    assert_eq!(cells.len(), 4);
    assert!(cells.iter().any(|c| c.row == 2 && c.value == "Longest river?"));
    assert!(!cells.iter().any(|c| c.row == 1 && c.col == 4));
}

#[tokio::test]
async fn list_rows_follow_header_names() {
    let db = common::create_seeded_db().await;

    let row = db
        .append_row("rivers", "board", fields(&[("LDAP", "alice"), ("Score", "40")]))
        .await
        .unwrap();
    assert_eq!(row, 3);

    db.update_row("rivers", "board", row, fields(&[("score", "55")]))
        .await
        .unwrap();

    let rows = db.rows("rivers", "board").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].fields, fields(&[("ldap", "bob"), ("score", "30")]));
    assert_eq!(rows[1].row, 3);
    assert_eq!(rows[1].fields, fields(&[("ldap", "alice"), ("score", "55")]));
}

#[tokio::test]
async fn append_to_empty_sheet_starts_below_header() {
    let db = common::create_seeded_db().await;

    let row = db
        .append_row(
            "feedback",
            "responses",
            fields(&[("ldap", "alice"), ("question", "1"), ("answer", "Graphs"), ("success", "0")]),
        )
        .await
        .unwrap();
    assert_eq!(row, 2);
}

#[tokio::test]
async fn unknown_field_is_rejected_without_writing() {
    let db = common::create_seeded_db().await;

    let result = db
        .append_row("rivers", "board", fields(&[("ldap", "carol"), ("rank", "1")]))
        .await;
    assert!(result.is_err());
    assert_eq!(db.rows("rivers", "board").await.unwrap().len(), 1);
}

#[tokio::test]
async fn import_replaces_existing_document() {
    let db = common::create_seeded_db().await;
    db.write_cells(
        "rivers",
        "board",
        vec![CellUpdate {
            row: 5,
            col: 1,
            value: "stale".to_string(),
        }],
    )
    .await
    .unwrap();

    let count = db.import(&common::fixture()).await.unwrap();
    assert_eq!(count, 5);

    let rows = db.rows("rivers", "board").await.unwrap();
    assert_eq!(rows.len(), 1);
}
