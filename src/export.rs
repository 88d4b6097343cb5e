//! CSV Export
//!
//! Flattens designs and size breakdowns into CSV text. Fields that contain delimiters, quotes or
//! newlines are quoted; everything else is written as-is.

use std::fmt;

use jiff::civil::Date;
use thiserror::Error;

pub mod breakdown;
pub mod designs;

pub use breakdown::{BREAKDOWN_HEADERS, breakdown_rows};
pub use designs::{DESIGN_HEADERS, design_rows};

/// MIME type of every export.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer rejected a record, e.g. a row with the wrong number of fields.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The CSV writer could not be flushed.
    #[error("failed to flush CSV writer")]
    Flush,

    /// The written bytes were not UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A single exported value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvField {
    /// Free text
    Text(String),

    /// Number; missing numbers render as `0`
    Number(Option<i64>),

    /// Boolean, rendered `Yes`/`No`
    Bool(bool),

    /// List, joined with `;`
    List(Vec<String>),
}

impl fmt::Display for CsvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvField::Text(text) => f.write_str(text),
            CsvField::Number(number) => write!(f, "{}", number.unwrap_or(0)),
            CsvField::Bool(true) => f.write_str("Yes"),
            CsvField::Bool(false) => f.write_str("No"),
            CsvField::List(values) => f.write_str(&values.join(";")),
        }
    }
}

impl From<&str> for CsvField {
    fn from(value: &str) -> Self {
        CsvField::Text(value.to_string())
    }
}

impl From<String> for CsvField {
    fn from(value: String) -> Self {
        CsvField::Text(value)
    }
}

impl From<bool> for CsvField {
    fn from(value: bool) -> Self {
        CsvField::Bool(value)
    }
}

impl From<i64> for CsvField {
    fn from(value: i64) -> Self {
        CsvField::Number(Some(value))
    }
}

impl From<Vec<String>> for CsvField {
    fn from(value: Vec<String>) -> Self {
        CsvField::List(value)
    }
}

/// Render a header row followed by `rows`.
///
/// Records are separated by `\n`, with no trailing newline. Fields containing a comma, quote or
/// newline are quoted. A row whose only field is empty is written as `""` so it is not read back
/// as a blank line; empty fields in wider rows stay bare.
///
/// # Errors
///
/// - [`ExportError::Csv`]: a row has a different number of fields than the header.
/// - [`ExportError::Flush`]: the writer could not be flushed.
pub fn to_csv<H>(headers: &[H], rows: &[Vec<CsvField>]) -> Result<String, ExportError>
where
    H: AsRef<str>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers.iter().map(AsRef::as_ref))?;

    for row in rows {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }

    let bytes = writer.into_inner().map_err(|_err| ExportError::Flush)?;
    let mut contents = String::from_utf8(bytes)?;

    if contents.ends_with('\n') {
        contents.pop();
    }

    Ok(contents)
}

/// A rendered export ready to be handed to a download surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// `<entity>-<YYYY-MM-DD>.csv`
    pub filename: String,

    /// Always [`CSV_MIME_TYPE`]
    pub mime_type: &'static str,

    /// CSV text
    pub contents: String,
}

impl ExportFile {
    /// Wrap CSV `contents` for `entity`, stamped with `date`.
    pub fn csv(entity: &str, date: Date, contents: String) -> Self {
        Self {
            filename: format!("{entity}-{date}.csv"),
            mime_type: CSV_MIME_TYPE,
            contents,
        }
    }
}
