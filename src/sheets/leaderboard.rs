use std::collections::HashMap;

use super::{Grid, SheetError};
use crate::{db::ListRow, models::LeaderboardEntry, names};

/// Reads leaderboard entries from the sheet grid, keeping sheet order.
pub fn entries(grid: &Grid) -> Result<Vec<LeaderboardEntry>, SheetError> {
    grid.iter()
        .map(|row| match row.as_slice() {
            [user_id, score, ..] => Ok(LeaderboardEntry {
                user_id: user_id.clone(),
                score: parse_score(score)?,
            }),
            _ => Err(SheetError::Format("leaderboard row needs a user and a score")),
        })
        .collect()
}

fn parse_score(cell: &str) -> Result<i64, SheetError> {
    cell.trim()
        .parse()
        .map_err(|_| SheetError::Format("leaderboard scores must be whole numbers"))
}

/// What a new score does to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreChange {
    /// First score of this user.
    Insert,
    /// New personal best, replaces the score stored in `row`.
    Raise { row: u32, previous: i64 },
    /// Not better than the stored score.
    Keep { best: i64 },
}

/// Leaderboard rows indexed by user.
pub struct Leaderboard<'a> {
    by_user: HashMap<&'a str, &'a ListRow>,
}

impl<'a> Leaderboard<'a> {
    /// Indexes list rows. When a user appears twice the first row wins.
    pub fn new(rows: &'a [ListRow]) -> Self {
        let mut by_user = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(user) = row.fields.get(names::FIELD_USER) {
                by_user.entry(user.as_str()).or_insert(row);
            }
        }
        Self { by_user }
    }

    pub fn change_for(&self, user_id: &str, score: i64) -> Result<ScoreChange, SheetError> {
        let Some(row) = self.by_user.get(user_id) else {
            return Ok(ScoreChange::Insert);
        };

        let stored = row
            .fields
            .get(names::FIELD_SCORE)
            .map(|s| parse_score(s))
            .transpose()?
            .unwrap_or(0);

        if score > stored {
            Ok(ScoreChange::Raise {
                row: row.row,
                previous: stored,
            })
        } else {
            Ok(ScoreChange::Keep { best: stored })
        }
    }
}
