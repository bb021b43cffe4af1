use std::collections::{BTreeMap, HashMap};

use color_eyre::{eyre::eyre, Result};

use super::models::{Cell, CellUpdate, DocumentEntry, DocumentKind, ListRow, RowFields, Workbook};
use super::{Db, Inaccessible};
use crate::{names, services::SheetStore};

/// Header cells name list-row fields case- and whitespace-insensitively.
pub(super) fn normalize_field(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Db {
    async fn ensure_worksheet(&self, document_id: &str, sheet_id: &str) -> Result<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM worksheets WHERE document_id = ? AND sheet_id = ?)",
        )
        .bind(document_id)
        .bind(sheet_id)
        .fetch_one(&self.pool)
        .await?;

        if !exists {
            return Err(Inaccessible(format!("worksheet {sheet_id} of document {document_id}")).into());
        }
        Ok(())
    }

    async fn fetch_cells(&self, document_id: &str, sheet_id: &str) -> Result<Vec<Cell>> {
        self.ensure_worksheet(document_id, sheet_id).await?;

        let cells = sqlx::query_as::<_, (u32, u32, String)>(
            r#"
            SELECT row_idx, col_idx, value FROM cells
            WHERE document_id = ? AND sheet_id = ?
            ORDER BY row_idx, col_idx
            "#,
        )
        .bind(document_id)
        .bind(sheet_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(row, col, value)| Cell { row, col, value })
        .collect();

        Ok(cells)
    }

    /// Applies all updates in one transaction.
    async fn apply_updates(
        &self,
        document_id: &str,
        sheet_id: &str,
        updates: &[CellUpdate],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for update in updates {
            if update.value.is_empty() {
                sqlx::query(
                    "DELETE FROM cells WHERE document_id = ? AND sheet_id = ? AND row_idx = ? AND col_idx = ?",
                )
                .bind(document_id)
                .bind(sheet_id)
                .bind(update.row)
                .bind(update.col)
                .execute(&mut *tx)
                .await?;
            } else {
                sqlx::query(
                    r#"
                    INSERT INTO cells (document_id, sheet_id, row_idx, col_idx, value)
                    VALUES (?, ?, ?, ?, ?)
                    ON CONFLICT (document_id, sheet_id, row_idx, col_idx)
                    DO UPDATE SET value = excluded.value
                    "#,
                )
                .bind(document_id)
                .bind(sheet_id)
                .bind(update.row)
                .bind(update.col)
                .bind(&update.value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Maps normalized header names to their column.
    async fn columns(&self, document_id: &str, sheet_id: &str) -> Result<HashMap<String, u32>> {
        let header = sqlx::query_as::<_, (u32, String)>(
            "SELECT col_idx, value FROM cells WHERE document_id = ? AND sheet_id = ? AND row_idx = 1",
        )
        .bind(document_id)
        .bind(sheet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(header
            .into_iter()
            .map(|(col, value)| (normalize_field(&value), col))
            .collect())
    }

    async fn row_updates(
        &self,
        document_id: &str,
        sheet_id: &str,
        row: u32,
        fields: RowFields,
    ) -> Result<Vec<CellUpdate>> {
        let columns = self.columns(document_id, sheet_id).await?;

        fields
            .into_iter()
            .map(|(name, value)| -> Result<CellUpdate> {
                let col = columns
                    .get(&normalize_field(&name))
                    .copied()
                    .ok_or_else(|| eyre!("sheet {sheet_id} has no column named {name}"))?;
                Ok(CellUpdate { row, col, value })
            })
            .collect()
    }
}

impl SheetStore for Db {
    async fn workbook(&self, document_id: &str) -> Result<Workbook> {
        let title: Option<String> = sqlx::query_scalar(
            "SELECT title FROM documents WHERE id = ? AND kind = ?",
        )
        .bind(document_id)
        .bind(DocumentKind::Spreadsheet.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let title = title.ok_or_else(|| Inaccessible(format!("document {document_id}")))?;

        let sheet_ids: Vec<String> = sqlx::query_scalar(
            "SELECT sheet_id FROM worksheets WHERE document_id = ? ORDER BY position",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Workbook { title, sheet_ids })
    }

    async fn collection(&self, collection_id: &str) -> Result<Vec<DocumentEntry>> {
        let known: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM documents WHERE id = ? AND kind = ?)
                OR EXISTS(SELECT 1 FROM documents WHERE collection_id = ?)
            "#,
        )
        .bind(collection_id)
        .bind(DocumentKind::Folder.as_str())
        .bind(collection_id)
        .fetch_one(&self.pool)
        .await?;

        if !known {
            return Err(Inaccessible(format!("collection {collection_id}")).into());
        }

        let entries = sqlx::query_as::<_, (String, String, String)>(
            "SELECT id, title, kind FROM documents WHERE collection_id = ? ORDER BY title, id",
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(id, title, kind)| DocumentEntry {
            id,
            title,
            kind: DocumentKind::from_db(&kind),
        })
        .collect();

        Ok(entries)
    }

    async fn cells(&self, document_id: &str, sheet_id: &str) -> Result<Vec<Cell>> {
        self.fetch_cells(document_id, sheet_id).await
    }

    async fn write_cells(
        &self,
        document_id: &str,
        sheet_id: &str,
        updates: Vec<CellUpdate>,
    ) -> Result<()> {
        self.ensure_worksheet(document_id, sheet_id).await?;
        self.apply_updates(document_id, sheet_id, &updates).await?;

        tracing::info!(
            "wrote {} cells to sheet={sheet_id} of document={document_id}",
            updates.len()
        );
        Ok(())
    }

    async fn rows(&self, document_id: &str, sheet_id: &str) -> Result<Vec<ListRow>> {
        let mut header: HashMap<u32, String> = HashMap::new();
        let mut rows: BTreeMap<u32, RowFields> = BTreeMap::new();

        for cell in self.fetch_cells(document_id, sheet_id).await? {
            if cell.row < names::FIRST_DATA_ROW {
                header.insert(cell.col, normalize_field(&cell.value));
                continue;
            }
            if let Some(name) = header.get(&cell.col) {
                rows.entry(cell.row)
                    .or_default()
                    .insert(name.clone(), cell.value);
            }
        }

        Ok(rows
            .into_iter()
            .map(|(row, fields)| ListRow { row, fields })
            .collect())
    }

    async fn append_row(&self, document_id: &str, sheet_id: &str, fields: RowFields) -> Result<u32> {
        self.ensure_worksheet(document_id, sheet_id).await?;

        let last: Option<u32> = sqlx::query_scalar(
            "SELECT MAX(row_idx) FROM cells WHERE document_id = ? AND sheet_id = ?",
        )
        .bind(document_id)
        .bind(sheet_id)
        .fetch_one(&self.pool)
        .await?;
        let row = last.map_or(names::FIRST_DATA_ROW, |last| {
            (last + 1).max(names::FIRST_DATA_ROW)
        });

        let updates = self.row_updates(document_id, sheet_id, row, fields).await?;
        self.apply_updates(document_id, sheet_id, &updates).await?;

        tracing::info!("appended row {row} to sheet={sheet_id} of document={document_id}");
        Ok(row)
    }

    async fn update_row(
        &self,
        document_id: &str,
        sheet_id: &str,
        row: u32,
        fields: RowFields,
    ) -> Result<()> {
        self.ensure_worksheet(document_id, sheet_id).await?;

        let updates = self.row_updates(document_id, sheet_id, row, fields).await?;
        self.apply_updates(document_id, sheet_id, &updates).await?;

        tracing::info!("updated row {row} of sheet={sheet_id} in document={document_id}");
        Ok(())
    }
}
