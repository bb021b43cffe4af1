use rand::{rngs::StdRng, SeedableRng};

use super::SheetStore;
use crate::{
    db::{Db, DocumentKind, RowFields},
    models::{
        DocumentListing, LeaderboardEntry, Quiz, QuizSubmission, LISTING_COLLECTION, LISTING_QUIZ,
    },
    names,
    sheets::{
        self,
        leaderboard::{self, Leaderboard, ScoreChange},
        quiz::{parse_quiz, QuizSheets},
        statistics::Tally,
        SheetError,
    },
};

/// Reads quizzes and records finished attempts.
pub struct QuizService<S: SheetStore = Db> {
    store: S,
}

impl<S: SheetStore + Clone> Clone for QuizService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: SheetStore> QuizService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Quizzes and sub-collections filed in a collection.
    pub async fn collection(&self, collection_id: &str) -> Result<Vec<DocumentListing>, SheetError> {
        let entries = self.store.collection(collection_id).await?;

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let kind = match entry.kind {
                    DocumentKind::Spreadsheet => LISTING_QUIZ,
                    DocumentKind::Folder => LISTING_COLLECTION,
                    DocumentKind::Other => return None,
                };
                Some(DocumentListing {
                    kind,
                    title: sheets::format_title(&entry.title, names::QUIZ_TITLE_TAG),
                    id: entry.id,
                })
            })
            .collect())
    }

    /// A freshly shuffled quiz.
    pub async fn quiz(&self, document_id: &str) -> Result<Quiz, SheetError> {
        self.quiz_seeded(document_id, rand::random()).await
    }

    /// Like [`quiz`](Self::quiz) with a fixed shuffle seed.
    pub async fn quiz_seeded(&self, document_id: &str, seed: u64) -> Result<Quiz, SheetError> {
        let workbook = self.store.workbook(document_id).await?;
        let [questions_sheet, metadata_sheet, leaderboard, statistics] =
            sheets::required_sheets(&workbook)?;

        let questions = sheets::read_grid(self.store.cells(document_id, questions_sheet).await?);
        let metadata = sheets::read_grid(self.store.cells(document_id, metadata_sheet).await?);

        let mut rng = StdRng::seed_from_u64(seed);
        parse_quiz(
            document_id,
            &workbook.title,
            QuizSheets {
                leaderboard,
                statistics,
            },
            &questions,
            &metadata,
            &mut rng,
        )
    }

    pub async fn leaderboard(
        &self,
        document_id: &str,
        sheet_id: &str,
    ) -> Result<Vec<LeaderboardEntry>, SheetError> {
        let grid = sheets::read_grid(self.store.cells(document_id, sheet_id).await?);
        leaderboard::entries(&grid)
    }

    /// Records a finished attempt: keeps the user's best score on the
    /// leaderboard and adds the answers to the statistics sheet.
    ///
    /// Both sheets are read and checked before either is written. Nothing is
    /// locked, so simultaneous submissions can overwrite each other.
    pub async fn submit(
        &self,
        user_id: &str,
        submission: &QuizSubmission,
    ) -> Result<ScoreChange, SheetError> {
        let document_id = submission.document_id.as_str();

        let grid = sheets::read_grid(
            self.store
                .cells(document_id, &submission.statistics_sheet)
                .await?,
        );
        let mut tally = Tally::from_grid(&grid)?;
        tally.merge(&submission.questions)?;

        let rows = self
            .store
            .rows(document_id, &submission.leaderboard_sheet)
            .await?;
        let change = Leaderboard::new(&rows).change_for(user_id, submission.score)?;

        match &change {
            ScoreChange::Insert => {
                let fields = RowFields::from([
                    (names::FIELD_USER.to_string(), user_id.to_string()),
                    (names::FIELD_SCORE.to_string(), submission.score.to_string()),
                ]);
                self.store
                    .append_row(document_id, &submission.leaderboard_sheet, fields)
                    .await?;
                tracing::info!("first score {} for {user_id} in {document_id}", submission.score);
            }
            ScoreChange::Raise { row, previous } => {
                let fields = RowFields::from([(
                    names::FIELD_SCORE.to_string(),
                    submission.score.to_string(),
                )]);
                self.store
                    .update_row(document_id, &submission.leaderboard_sheet, *row, fields)
                    .await?;
                tracing::info!(
                    "raised score of {user_id} in {document_id} from {previous} to {}",
                    submission.score
                );
            }
            ScoreChange::Keep { best } => {
                tracing::info!(
                    "score {} of {user_id} in {document_id} does not beat {best}",
                    submission.score
                );
            }
        }

        self.store
            .write_cells(document_id, &submission.statistics_sheet, tally.cell_updates())
            .await?;

        Ok(change)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
