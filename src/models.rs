use serde::{Deserialize, Serialize};

use crate::db::DocumentKind;

/// Deserialize a value that may be either a JSON number or a string containing a number.
/// The web player posts scores as strings, the Android client as numbers.
fn deserialize_string_or_i64<'de, D: serde::Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = i64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("number or numeric string")
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim().parse().map_err(E::custom)
        }
    }
    d.deserialize_any(Vis)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_text: String,
    pub correct: bool,
    /// Position of the answer in the sheet row, before any shuffling.
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_text: String,
    pub answers: Vec<Answer>,
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub description: String,
    pub image: String,
    pub document_id: String,
    pub leaderboard_sheet: String,
    pub statistics_sheet: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollQuestion {
    pub question_text: String,
    pub anonymous: bool,
    pub answers: Vec<Answer>,
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub title: String,
    pub document_id: String,
    pub internal_data_sheet: String,
    pub responses_sheet: String,
    pub questions: Vec<PollQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "ldap")]
    pub user_id: String,
    pub score: i64,
}

pub const LISTING_COLLECTION: u8 = 0;
pub const LISTING_QUIZ: u8 = 1;

/// One entry of a collection listing. `type` is [`LISTING_COLLECTION`] or [`LISTING_QUIZ`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentListing {
    #[serde(rename = "type")]
    pub kind: u8,
    pub title: String,
    pub id: String,
}

/// A finished quiz as posted back by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmission {
    pub document_id: String,
    pub leaderboard_sheet: String,
    pub statistics_sheet: String,
    #[serde(deserialize_with = "deserialize_string_or_i64")]
    pub score: i64,
    #[serde(default)]
    pub questions: Vec<GradedQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradedQuestion {
    pub number: usize,
    pub question_text: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub answers: Vec<GradedAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradedAnswer {
    pub number: usize,
    #[serde(default)]
    pub answered: bool,
}

/// A single poll answer as posted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSubmission {
    pub document_id: String,
    pub sheet_id: String,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(deserialize_with = "deserialize_string_or_i64")]
    pub question_number: i64,
    /// Free-form answer payload, stored verbatim.
    pub answers: String,
    #[serde(default)]
    pub success: bool,
}

/// Workbooks to load into the store, e.g. from `--import`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkbookFixture {
    pub documents: Vec<DocumentFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentFixture {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub sheets: Vec<SheetFixture>,
}

/// A worksheet given as raw rows, header row included.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetFixture {
    pub id: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}
