use super::{Grid, SheetError};
use crate::{db::CellUpdate, models::GradedQuestion, names};

/// Accumulated results for one quiz question.
///
/// Stored as a sheet row: `text, successes, failures, "<rate> %", count, count, ...`
/// where the counts are indexed by answer number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyRow {
    pub text: String,
    pub successes: u64,
    pub failures: u64,
    pub failure_rate: String,
    pub answer_counts: Vec<u64>,
}

impl TallyRow {
    fn not_answered_yet() -> Self {
        Self {
            text: names::NOT_ANSWERED_YET.to_string(),
            successes: 0,
            failures: 0,
            failure_rate: "0 %".to_string(),
            answer_counts: Vec::new(),
        }
    }

    fn from_row(row: &[String]) -> Result<Self, SheetError> {
        let [text, successes, failures, failure_rate, counts @ ..] = row else {
            return Err(SheetError::Format("statistics row needs at least four columns"));
        };

        Ok(Self {
            text: text.clone(),
            successes: parse_count(successes)?,
            failures: parse_count(failures)?,
            failure_rate: failure_rate.clone(),
            answer_counts: counts
                .iter()
                .map(|c| parse_count(c))
                .collect::<Result<_, _>>()?,
        })
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.text.clone(),
            self.successes.to_string(),
            self.failures.to_string(),
            self.failure_rate.clone(),
        ];
        cells.extend(self.answer_counts.iter().map(u64::to_string));
        cells
    }

    fn record(&mut self, question: &GradedQuestion) {
        self.text = question.question_text.clone();
        if question.success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        let rate = 100 * self.failures / (self.successes + self.failures);
        self.failure_rate = format!("{rate} %");

        for answer in question.answers.iter().filter(|a| a.answered) {
            if answer.number >= self.answer_counts.len() {
                self.answer_counts.resize(answer.number + 1, 0);
            }
            self.answer_counts[answer.number] += 1;
        }
    }
}

// Cells left blank in the sheet count as zero.
fn parse_count(cell: &str) -> Result<u64, SheetError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(0);
    }
    cell.parse()
        .map_err(|_| SheetError::Format("statistics counts must be whole numbers"))
}

/// Per-question statistics of a quiz, one row per question number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub rows: Vec<TallyRow>,
}

impl Tally {
    pub fn from_grid(grid: &Grid) -> Result<Self, SheetError> {
        let rows = grid
            .iter()
            .map(|row| TallyRow::from_row(row))
            .collect::<Result<_, _>>()?;
        Ok(Self { rows })
    }

    /// Adds one graded attempt. Question numbers not seen before get rows,
    /// with placeholder rows for any numbers skipped on the way.
    ///
    /// Numbers more than [`names::MAX_NEW_TALLY_ROWS`] rows or
    /// [`names::MAX_NEW_TALLY_ANSWERS`] answer columns past the current end are
    /// rejected before anything is recorded.
    pub fn merge(&mut self, questions: &[GradedQuestion]) -> Result<(), SheetError> {
        self.check(questions)?;

        for question in questions {
            if question.number >= self.rows.len() {
                self.rows
                    .resize_with(question.number + 1, TallyRow::not_answered_yet);
            }
            self.rows[question.number].record(question);
        }
        Ok(())
    }

    fn check(&self, questions: &[GradedQuestion]) -> Result<(), SheetError> {
        let row_limit = self.rows.len().saturating_add(names::MAX_NEW_TALLY_ROWS);

        for question in questions {
            if question.number >= row_limit {
                return Err(SheetError::Submission("question number out of range"));
            }

            let known_answers = self
                .rows
                .get(question.number)
                .map_or(0, |row| row.answer_counts.len());
            let answer_limit = known_answers.saturating_add(names::MAX_NEW_TALLY_ANSWERS);
            if question.answers.iter().any(|a| a.number >= answer_limit) {
                return Err(SheetError::Submission("answer number out of range"));
            }
        }
        Ok(())
    }

    /// Cell writes for the whole tally, addressed below the header row.
    pub fn cell_updates(&self) -> Vec<CellUpdate> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, tally)| {
                tally
                    .cells()
                    .into_iter()
                    .enumerate()
                    .map(move |(col, value)| CellUpdate {
                        row: row as u32 + names::FIRST_DATA_ROW,
                        col: col as u32 + 1,
                        value,
                    })
            })
            .collect()
    }
}
