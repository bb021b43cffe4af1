#![allow(dead_code)]

use quizpoll::{db::Db, models::WorkbookFixture};

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("quizpoll_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());
    Db::new(&url).await.expect("failed to create test database")
}

/// A collection holding a folder, a quiz, a poll and an unformatted quiz.
pub fn fixture() -> WorkbookFixture {
    serde_json::from_value(serde_json::json!({
        "documents": [
            { "id": "root", "title": "Courses", "kind": "folder" },
            { "id": "geo", "title": "Geography", "kind": "folder", "collection": "root" },
            {
                "id": "rivers",
                "title": "[Q] Rivers",
                "collection": "root",
                "sheets": [
                    {
                        "id": "questions",
                        "rows": [
                            ["Question", "Answers"],
                            ["Longest river?", "Nile*", "Amazon", "Danube"],
                            ["Deepest lake?", "Baikal*", "Tanganyika"]
                        ]
                    },
                    {
                        "id": "meta",
                        "rows": [["Description", "Image"], ["All about rivers", "river.png"]]
                    },
                    {
                        "id": "board",
                        "rows": [["ldap", "score"], ["bob", "30"]]
                    },
                    {
                        "id": "stats",
                        "rows": [["Question", "Successes", "Failures", "Failure rate"]]
                    }
                ]
            },
            {
                "id": "broken",
                "title": "[Q] Broken",
                "collection": "root",
                "sheets": [
                    { "id": "questions", "rows": [["Question"]] },
                    { "id": "meta", "rows": [["Description"]] },
                    { "id": "board", "rows": [["ldap", "score"]] }
                ]
            },
            {
                "id": "feedback",
                "title": "[P] Lecture feedback",
                "collection": "root",
                "sheets": [
                    { "id": "intro", "rows": [] },
                    {
                        "id": "questions",
                        "rows": [
                            ["Question", "Image", "Anonymous", "Answers"],
                            ["Pace?", "", "1", "Too slow", "Fine", "Too fast"],
                            ["Favourite topic?", "", "0", "Sorting", "Graphs"]
                        ]
                    },
                    {
                        "id": "internal",
                        "rows": [["Status", "", "", "Minimal version"], ["open", "", "", "5"]]
                    },
                    {
                        "id": "responses",
                        "rows": [["ldap", "question", "answer", "success"]]
                    }
                ]
            }
        ]
    }))
    .expect("fixture should deserialize")
}

pub async fn create_seeded_db() -> Db {
    let db = create_test_db().await;
    db.import(&fixture()).await.expect("fixture should import");
    db
}
