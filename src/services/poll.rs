use super::SheetStore;
use crate::{
    cache::MemoryCache,
    db::{Db, RowFields},
    models::PollSubmission,
    names,
    sheets::{
        self,
        poll::{already_answered, check_client_version, client_version, parse_poll, PollSheets},
        SheetError,
    },
};

/// Serves polls and records poll responses.
///
/// Poll documents and poll status are cached as serialized JSON, so repeated
/// reads return byte-identical payloads until the entry expires.
pub struct PollService<S: SheetStore = Db> {
    store: S,
    cache: MemoryCache,
}

impl<S: SheetStore + Clone> Clone for PollService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<S: SheetStore> PollService<S> {
    pub fn new(store: S, cache: MemoryCache) -> Self {
        Self { store, cache }
    }

    /// The poll of a document as JSON.
    ///
    /// Clients that announce a version in their user agent must be at least
    /// at the minimal version stored in the poll's internal data sheet.
    /// Cached polls are returned without that check.
    pub async fn poll(&self, document_id: &str, user_agent: &str) -> Result<String, SheetError> {
        let key = names::poll_cache_key(document_id);
        if let Some(payload) = self.cache.get(&key) {
            tracing::debug!("poll {document_id} served from cache");
            return Ok(payload);
        }

        let workbook = self.store.workbook(document_id).await?;
        let [_, questions_sheet, internal_data, responses] = sheets::required_sheets(&workbook)?;

        if let Some(client) = client_version(user_agent) {
            let grid = sheets::read_grid(self.store.cells(document_id, internal_data).await?);
            check_client_version(client, &grid)?;
        }

        let questions = sheets::read_grid(self.store.cells(document_id, questions_sheet).await?);
        let poll = parse_poll(
            document_id,
            &workbook.title,
            PollSheets {
                internal_data,
                responses,
            },
            &questions,
        )?;

        let payload = serde_json::to_string(&poll)?;
        self.cache.set(&key, payload.clone(), names::POLL_CACHE_TTL);

        Ok(payload)
    }

    /// The first data cell of a sheet, JSON-encoded as a string.
    pub async fn status(&self, document_id: &str, sheet_id: &str) -> Result<String, SheetError> {
        let key = names::poll_status_cache_key(document_id);
        if let Some(payload) = self.cache.get(&key) {
            return Ok(payload);
        }

        let grid = sheets::read_grid(self.store.cells(document_id, sheet_id).await?);
        let status = grid
            .first()
            .and_then(|row| row.first())
            .ok_or(SheetError::Format("poll status sheet is empty"))?;

        let payload = serde_json::to_string(status)?;
        self.cache
            .set(&key, payload.clone(), names::POLL_STATUS_CACHE_TTL);

        Ok(payload)
    }

    pub fn invalidate_status(&self, document_id: &str) {
        self.cache.delete(&names::poll_status_cache_key(document_id));
    }

    /// Appends a response row. Named users answer each question once; later
    /// answers are dropped and `false` is returned. Anonymous responses are
    /// always recorded.
    pub async fn submit(
        &self,
        user_id: &str,
        submission: &PollSubmission,
    ) -> Result<bool, SheetError> {
        let document_id = submission.document_id.as_str();
        let sheet_id = submission.sheet_id.as_str();

        let user = if submission.anonymous {
            names::ANONYMOUS_USER
        } else {
            let grid = sheets::read_grid(self.store.cells(document_id, sheet_id).await?);
            if already_answered(&grid, user_id, submission.question_number) {
                tracing::warn!(
                    "{user_id} already answered question {} of poll {document_id}",
                    submission.question_number
                );
                return Ok(false);
            }
            user_id
        };

        let success = if submission.success { "1" } else { "0" };
        let fields = RowFields::from([
            (names::FIELD_USER.to_string(), user.to_string()),
            (
                names::FIELD_QUESTION.to_string(),
                submission.question_number.to_string(),
            ),
            (names::FIELD_ANSWER.to_string(), submission.answers.clone()),
            (names::FIELD_SUCCESS.to_string(), success.to_string()),
        ]);
        self.store.append_row(document_id, sheet_id, fields).await?;

        Ok(true)
    }
}
