use color_eyre::Result;

use super::Db;
use crate::models::WorkbookFixture;

impl Db {
    /// Loads documents with their worksheets, replacing documents that share an id.
    /// Returns the number of documents written.
    pub async fn import(&self, fixture: &WorkbookFixture) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for document in &fixture.documents {
            sqlx::query("DELETE FROM cells WHERE document_id = ?")
                .bind(&document.id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM worksheets WHERE document_id = ?")
                .bind(&document.id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO documents (id, title, kind, collection_id) VALUES (?, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                    title = excluded.title,
                    kind = excluded.kind,
                    collection_id = excluded.collection_id
                "#,
            )
            .bind(&document.id)
            .bind(&document.title)
            .bind(document.kind.as_str())
            .bind(&document.collection)
            .execute(&mut *tx)
            .await?;

            for (position, sheet) in document.sheets.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO worksheets (document_id, sheet_id, position) VALUES (?, ?, ?)",
                )
                .bind(&document.id)
                .bind(&sheet.id)
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;

                for (row, values) in sheet.rows.iter().enumerate() {
                    for (col, value) in values.iter().enumerate() {
                        if value.is_empty() {
                            continue;
                        }
                        sqlx::query(
                            "INSERT INTO cells (document_id, sheet_id, row_idx, col_idx, value) VALUES (?, ?, ?, ?, ?)",
                        )
                        .bind(&document.id)
                        .bind(&sheet.id)
                        .bind(row as i64 + 1)
                        .bind(col as i64 + 1)
                        .bind(value)
                        .execute(&mut *tx)
                        .await?;
                    }
                }
            }

            tracing::info!(
                "imported document {} with {} sheets",
                document.id,
                document.sheets.len()
            );
        }

        tx.commit().await?;
        Ok(fixture.documents.len())
    }
}
