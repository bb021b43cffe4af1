use rand::{seq::SliceRandom, Rng};

use super::{format_title, parse_answer, Grid, SheetError};
use crate::{
    models::{Answer, Quiz, QuizQuestion},
    names,
};

/// Sheet ids a quiz document refers to, in workbook order.
pub struct QuizSheets<'a> {
    pub leaderboard: &'a str,
    pub statistics: &'a str,
}

/// Builds a quiz from its questions grid and metadata grid.
///
/// Each questions row is `question, answer, answer, ...`. Answers are
/// shuffled per question, then the questions themselves are shuffled and at
/// most [`names::MAX_QUIZ_QUESTIONS`] are kept. The first metadata row holds
/// the description and the image URL.
pub fn parse_quiz(
    document_id: &str,
    title: &str,
    sheets: QuizSheets<'_>,
    questions: &Grid,
    metadata: &Grid,
    rng: &mut impl Rng,
) -> Result<Quiz, SheetError> {
    if questions.is_empty() {
        return Err(SheetError::Format("quiz has no questions"));
    }

    let mut parsed = Vec::with_capacity(questions.len());
    for (number, row) in questions.iter().enumerate() {
        let (question_text, cells) = match row.split_first() {
            Some((text, cells)) if !cells.is_empty() => (text, cells),
            _ => return Err(SheetError::Format("quiz question has no answers")),
        };

        let mut answers: Vec<Answer> = cells
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
        answers.shuffle(rng);

        parsed.push(QuizQuestion {
            question_text: question_text.clone(),
            answers,
            number,
        });
    }

    parsed.shuffle(rng);
    parsed.truncate(names::MAX_QUIZ_QUESTIONS);

    let (description, image) = match metadata.first() {
        Some(row) if row.len() >= 2 => (row[0].clone(), row[1].clone()),
        _ => return Err(SheetError::Format("quiz metadata needs a description and an image")),
    };

    Ok(Quiz {
        title: format_title(title, names::QUIZ_TITLE_TAG),
        description,
        image,
        document_id: document_id.to_string(),
        leaderboard_sheet: sheets.leaderboard.to_string(),
        statistics_sheet: sheets.statistics.to_string(),
        questions: parsed,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const SHEETS: QuizSheets<'static> = QuizSheets {
        leaderboard: "od8",
        statistics: "od9",
    };

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn metadata() -> Grid {
        vec![row(&["All about capitals", "https://example.com/map.png"])]
    }

    fn questions(n: usize) -> Grid {
        (0..n)
            .map(|i| {
                let text = format!("Question {i}");
                row(&[text.as_str(), "right*", "wrong", "also wrong"])
            })
            .collect()
    }

    fn parse(questions: &Grid, metadata: &Grid) -> Result<Quiz, SheetError> {
        let mut rng = StdRng::seed_from_u64(7);
        parse_quiz("doc", "[Q] Capitals ", SHEETS, questions, metadata, &mut rng)
    }

    #[test]
    fn builds_quiz_document() {
        let quiz = parse(&questions(3), &metadata()).unwrap();

        assert_eq!(quiz.title, "Capitals");
        assert_eq!(quiz.description, "All about capitals");
        assert_eq!(quiz.image, "https://example.com/map.png");
        assert_eq!(quiz.document_id, "doc");
        assert_eq!(quiz.leaderboard_sheet, "od8");
        assert_eq!(quiz.statistics_sheet, "od9");
        assert_eq!(quiz.questions.len(), 3);

        let numbers: HashSet<usize> = quiz.questions.iter().map(|q| q.number).collect();
        assert_eq!(numbers, HashSet::from([0, 1, 2]));

        for question in &quiz.questions {
            assert_eq!(question.question_text, format!("Question {}", question.number));
            let right = question.answers.iter().find(|a| a.correct).unwrap();
            assert_eq!(right.answer_text, "right");
            assert_eq!(right.number, 0);
            assert_eq!(question.answers.iter().filter(|a| a.correct).count(), 1);
        }
    }

    #[test]
    fn keeps_at_most_ten_questions() {
        for count in [1, 9, 10, 11, 25] {
            let quiz = parse(&questions(count), &metadata()).unwrap();
            assert_eq!(quiz.questions.len(), count.min(10), "for {count} rows");

            let distinct: HashSet<usize> = quiz.questions.iter().map(|q| q.number).collect();
            assert_eq!(distinct.len(), quiz.questions.len());
        }
    }

    #[test]
    fn same_seed_gives_same_order() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = parse_quiz("doc", "t", SHEETS, &questions(12), &metadata(), &mut a).unwrap();
        let second = parse_quiz("doc", "t", SHEETS, &questions(12), &metadata(), &mut b).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn boolean_answers_are_normalized() {
        let grid = vec![row(&["Is water wet?", "true*", "FALSE"])];
        let quiz = parse(&grid, &metadata()).unwrap();

        let mut answers = quiz.questions[0].answers.clone();
        answers.sort_by_key(|a| a.number);
        assert_eq!(
            answers,
            vec![
                Answer {
                    answer_text: "True".to_string(),
                    correct: true,
                    number: 0
                },
                Answer {
                    answer_text: "False".to_string(),
                    correct: false,
                    number: 1
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_sheets() {
        assert!(matches!(
            parse(&Vec::new(), &metadata()),
            Err(SheetError::Format(_))
        ));
        assert!(matches!(
            parse(&vec![row(&["Question without answers"])], &metadata()),
            Err(SheetError::Format(_))
        ));
        assert!(matches!(
            parse(&questions(2), &Vec::new()),
            Err(SheetError::Format(_))
        ));
        assert!(matches!(
            parse(&questions(2), &vec![row(&["only a description"])]),
            Err(SheetError::Format(_))
        ));
    }
}
