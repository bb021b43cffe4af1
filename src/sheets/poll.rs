use super::{format_title, parse_answer, Grid, SheetError};
use crate::{
    models::{Answer, Poll, PollQuestion},
    names,
};

/// Sheet ids a poll document refers to.
pub struct PollSheets<'a> {
    pub internal_data: &'a str,
    pub responses: &'a str,
}

/// Client version carried in the fifth `/`-separated part of the user agent.
pub fn client_version(user_agent: &str) -> Option<i64> {
    user_agent.split('/').nth(4)?.trim().parse().ok()
}

/// Rejects clients older than the minimal version stored in the fourth
/// column of the first internal-data row.
///
/// Missing or non-numeric versions on either side skip the check.
pub fn check_client_version(client: i64, internal_data: &Grid) -> Result<(), SheetError> {
    let minimal = internal_data
        .first()
        .and_then(|row| row.get(3))
        .and_then(|cell| cell.trim().parse::<i64>().ok());

    match minimal {
        Some(minimal) if client < minimal => Err(SheetError::NeedsUpdate { client, minimal }),
        _ => Ok(()),
    }
}

/// Builds a poll from its questions grid.
///
/// Each row is `question, image, anonymous flag, answer, answer, ...`. The
/// image column is ignored and `1` in the flag column makes the question
/// anonymous. Question and answer order is kept as authored.
pub fn parse_poll(
    document_id: &str,
    title: &str,
    sheets: PollSheets<'_>,
    questions: &Grid,
) -> Result<Poll, SheetError> {
    if questions.is_empty() {
        return Err(SheetError::Format("poll has no questions"));
    }

    let questions = questions
        .iter()
        .enumerate()
        .map(|(number, row)| {
            let [question_text, _image, anonymous, cells @ ..] = row.as_slice() else {
                return Err(SheetError::Format("poll question needs at least four columns"));
            };
            if cells.is_empty() {
                return Err(SheetError::Format("poll question needs at least four columns"));
            }

            let answers = cells
                .iter()
                .enumerate()
                .map(|(number, cell)| {
                    let (answer_text, correct) = parse_answer(cell);
                    Answer {
                        answer_text,
                        correct,
                        number,
                    }
                })
                .collect();

            Ok(PollQuestion {
                question_text: question_text.clone(),
                anonymous: anonymous == names::ANONYMOUS_FLAG,
                answers,
                number,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Poll {
        title: format_title(title, names::POLL_TITLE_TAG),
        document_id: document_id.to_string(),
        internal_data_sheet: sheets.internal_data.to_string(),
        responses_sheet: sheets.responses.to_string(),
        questions,
    })
}

/// Whether `user_id` already has a response to `question_number` in the responses grid.
pub fn already_answered(responses: &Grid, user_id: &str, question_number: i64) -> bool {
    let question = question_number.to_string();
    responses
        .iter()
        .any(|row| row.first().map(String::as_str) == Some(user_id) && row.get(1) == Some(&question))
}
