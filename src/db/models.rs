// Store model structs

use std::collections::BTreeMap;

use serde::Deserialize;

/// A non-empty cell, addressed by 1-based row and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: String,
}

/// A cell write. An empty value clears the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub row: u32,
    pub col: u32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    pub title: String,
    /// Worksheet ids in tab order.
    pub sheet_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Spreadsheet,
    Folder,
    #[serde(other)]
    Other,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Folder => "folder",
            DocumentKind::Other => "other",
        }
    }

    pub fn from_db(kind: &str) -> Self {
        match kind {
            "spreadsheet" => DocumentKind::Spreadsheet,
            "folder" => DocumentKind::Folder,
            _ => DocumentKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub id: String,
    pub title: String,
    pub kind: DocumentKind,
}

/// Field values of a list row keyed by normalized header name.
pub type RowFields = BTreeMap<String, String>;

/// A data row of a sheet read through its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub row: u32,
    pub fields: RowFields,
}
