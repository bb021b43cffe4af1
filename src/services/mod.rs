pub mod poll;
pub mod quiz;

use std::future::Future;

use color_eyre::Result;

pub use poll::PollService;
pub use quiz::QuizService;

use crate::db::{Cell, CellUpdate, DocumentEntry, ListRow, RowFields, Workbook};

// ---------------------------------------------------------------------------
// SheetStore trait (the spreadsheet service the API reads and writes)
// ---------------------------------------------------------------------------

/// Access to spreadsheet documents.
///
/// Missing or unshared documents and sheets are reported as
/// [`Inaccessible`](crate::db::Inaccessible) errors.
#[cfg_attr(test, mockall::automock)]
pub trait SheetStore: Send + Sync {
    /// Title and worksheet ids of a spreadsheet.
    fn workbook(&self, document_id: &str) -> impl Future<Output = Result<Workbook>> + Send;

    /// Documents filed directly in a collection.
    fn collection(
        &self,
        collection_id: &str,
    ) -> impl Future<Output = Result<Vec<DocumentEntry>>> + Send;

    /// All non-empty cells of a worksheet, sorted by row, then column.
    fn cells(
        &self,
        document_id: &str,
        sheet_id: &str,
    ) -> impl Future<Output = Result<Vec<Cell>>> + Send;

    /// Writes all updates or none of them.
    fn write_cells(
        &self,
        document_id: &str,
        sheet_id: &str,
        updates: Vec<CellUpdate>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Data rows keyed by the header row.
    fn rows(
        &self,
        document_id: &str,
        sheet_id: &str,
    ) -> impl Future<Output = Result<Vec<ListRow>>> + Send;

    /// Adds a row below the last used one and returns its number.
    fn append_row(
        &self,
        document_id: &str,
        sheet_id: &str,
        fields: RowFields,
    ) -> impl Future<Output = Result<u32>> + Send;

    fn update_row(
        &self,
        document_id: &str,
        sheet_id: &str,
        row: u32,
        fields: RowFields,
    ) -> impl Future<Output = Result<()>> + Send;
}
