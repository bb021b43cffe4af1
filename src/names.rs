use std::time::Duration;

pub const API_PREFIX: &str = "/qp_api";

pub const QUIZ_TITLE_TAG: &str = "[Q]";
pub const POLL_TITLE_TAG: &str = "[P]";

// Quiz parsing
pub const MAX_QUIZ_QUESTIONS: usize = 10;
pub const NOT_ANSWERED_YET: &str = "-not answered yet-";

// Statistics may grow by at most this many question rows or answer columns per submission.
pub const MAX_NEW_TALLY_ROWS: usize = 100;
pub const MAX_NEW_TALLY_ANSWERS: usize = 100;

// Poll parsing
pub const ANONYMOUS_FLAG: &str = "1";
pub const ANONYMOUS_USER: &str = "Anonymous";

/// Row 1 of every sheet holds column headers.
pub const FIRST_DATA_ROW: u32 = 2;

// List-row field names, taken from the header row of the sheet.
pub const FIELD_USER: &str = "ldap";
pub const FIELD_SCORE: &str = "score";
pub const FIELD_QUESTION: &str = "question";
pub const FIELD_ANSWER: &str = "answer";
pub const FIELD_SUCCESS: &str = "success";

// Cache
pub const CACHE_CAPACITY: usize = 1024;
pub const POLL_CACHE_TTL: Duration = Duration::from_secs(30);
pub const POLL_STATUS_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

pub fn poll_cache_key(document_id: &str) -> String {
    format!("poll_{document_id}")
}

pub fn poll_status_cache_key(document_id: &str) -> String {
    format!("poll_status_{document_id}")
}

// Identity
pub const DEFAULT_USER_HEADER: &str = "x-authenticated-user-email";

pub const OK_RESPONSE: &str = "OK";
