//! Source Loader Module
//! Reads CSV text (via Polars) or spreadsheet workbooks (via calamine) into a `RawTable`.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Spreadsheet file extensions; anything else is read as delimited text.
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to parse spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Source is empty")]
    Empty,
    #[error("Workbook contains no worksheets")]
    NoWorksheet,
    #[error("Duplicate column label after trimming: {0:?}")]
    DuplicateColumn(String),
}

/// Declared encoding of a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated UTF-8 text with a header row.
    Text,
    /// Excel / OpenDocument workbook; the first worksheet is read.
    Spreadsheet,
}

impl SourceFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let is_sheet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                SPREADSHEET_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);

        if is_sheet {
            SourceFormat::Spreadsheet
        } else {
            SourceFormat::Text
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Text => write!(f, "text"),
            SourceFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// A table exactly as loaded. Every column holds text (nullable); labels are trimmed.
///
/// The label set is fixed at load time and the table is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RawTable {
    df: DataFrame,
}

impl RawTable {
    /// Build from a frame, trimming column labels.
    pub fn from_dataframe(mut df: DataFrame) -> Result<Self, LoaderError> {
        let trimmed: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        ensure_unique(&trimmed)?;
        df.set_column_names(trimmed)?;
        Ok(Self { df })
    }

    /// Column labels in source order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.df.get_column_index(label).is_some()
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// All values of one column as optional text.
    pub fn text_column(&self, label: &str) -> PolarsResult<Vec<Option<String>>> {
        let series = self
            .df
            .column(label)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        let ca = series.str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }
}

/// Reads tabular sources into a [`RawTable`].
pub struct DataLoader;

impl DataLoader {
    /// Parse `bytes` as the declared `format`.
    pub fn load_bytes(bytes: &[u8], format: SourceFormat) -> Result<RawTable, LoaderError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(LoaderError::Empty);
        }

        let table = match format {
            SourceFormat::Text => Self::read_csv(bytes)?,
            SourceFormat::Spreadsheet => Self::read_spreadsheet(bytes)?,
        };

        info!(
            %format,
            rows = table.row_count(),
            columns = table.columns().len(),
            "loaded source table"
        );
        Ok(table)
    }

    /// Read a file once; the format comes from `format` or else the extension.
    pub fn load_path(path: &Path, format: Option<SourceFormat>) -> Result<RawTable, LoaderError> {
        let format = format.unwrap_or_else(|| SourceFormat::from_path(path));
        debug!(path = %path.display(), %format, "reading source file");

        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_bytes(&bytes, format)
    }

    fn read_csv(bytes: &[u8]) -> Result<RawTable, LoaderError> {
        let mut cursor = Cursor::new(bytes);

        // Inference disabled: every column stays text, numeric coercion happens later.
        let opts = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0));
        let df = opts.into_reader_with_file_handle(&mut cursor).finish()?;

        RawTable::from_dataframe(df)
    }

    fn read_spreadsheet(bytes: &[u8]) -> Result<RawTable, LoaderError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoaderError::NoWorksheet)??;

        let mut rows = range.rows();
        let header = rows.next().ok_or(LoaderError::Empty)?;
        let labels: Vec<String> = header
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect();

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); labels.len()];
        for row in rows {
            for (col_idx, column) in values.iter_mut().enumerate() {
                column.push(row.get(col_idx).and_then(cell_text));
            }
        }

        // Checked before DataFrame::new so a collision names the label.
        let labels: Vec<String> = labels.iter().map(|l| l.trim().to_string()).collect();
        ensure_unique(&labels)?;

        let columns: Vec<Column> = labels
            .iter()
            .zip(values)
            .map(|(label, column)| Column::new(label.as_str().into(), column))
            .collect();

        RawTable::from_dataframe(DataFrame::new(columns)?)
    }
}

fn ensure_unique(labels: &[String]) -> Result<(), LoaderError> {
    for (i, name) in labels.iter().enumerate() {
        if labels[..i].contains(name) {
            return Err(LoaderError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}

/// Stringify one spreadsheet cell. Empty and error cells are missing.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(float_text(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(float_text(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Integral floats print without a fractional part (`100.0` → `"100"`).
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn xlsx_bytes(rows: &[(&str, f64)]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, " Country ").unwrap();
        sheet.write_string(0, 1, "Organic Google Search impressions").unwrap();
        sheet.write_string(0, 2, "Query").unwrap();
        for (i, (country, impressions)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_string(r, 0, *country).unwrap();
            sheet.write_number(r, 1, *impressions).unwrap();
            sheet.write_string(r, 2, "rust dashboards").unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_csv_labels_are_trimmed() {
        let csv = b" Country ,Organic Google Search impressions  ,Query\nUS,100,a\nFR,0,b\n";
        let table = DataLoader::load_bytes(csv, SourceFormat::Text).unwrap();

        assert_eq!(
            table.columns(),
            vec!["Country", "Organic Google Search impressions", "Query"]
        );
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_csv_cells_stay_text() {
        let csv = b"Country,Organic Google Search impressions\nUS,100\nJP,abc\nDE,\n";
        let table = DataLoader::load_bytes(csv, SourceFormat::Text).unwrap();
        let values = table
            .text_column("Organic Google Search impressions")
            .unwrap();

        assert_eq!(values[0].as_deref(), Some("100"));
        assert_eq!(values[1].as_deref(), Some("abc"));
        assert!(values[2].as_deref().map_or(true, str::is_empty));
    }

    #[test]
    fn test_csv_keeps_labels_case() {
        let csv = b"country,impressions\nUS,1\n";
        let table = DataLoader::load_bytes(csv, SourceFormat::Text).unwrap();

        assert!(table.has_column("country"));
        assert!(!table.has_column("Country"));
    }

    #[test]
    fn test_empty_source_is_format_error() {
        let err = DataLoader::load_bytes(b"", SourceFormat::Text).unwrap_err();
        assert!(matches!(err, LoaderError::Empty));

        let err = DataLoader::load_bytes(b"  \n", SourceFormat::Spreadsheet).unwrap_err();
        assert!(matches!(err, LoaderError::Empty));
    }

    #[test]
    fn test_garbage_spreadsheet_is_format_error() {
        let err = DataLoader::load_bytes(b"Country,Impressions\nUS,1\n", SourceFormat::Spreadsheet)
            .unwrap_err();
        assert!(matches!(err, LoaderError::Spreadsheet(_)));
    }

    #[test]
    fn test_duplicate_labels_after_trim() {
        let csv = b"Country, Country\nUS,US\n";
        let err = DataLoader::load_bytes(csv, SourceFormat::Text).unwrap_err();
        assert!(matches!(err, LoaderError::DuplicateColumn(label) if label == "Country"));
    }

    #[test]
    fn test_spreadsheet_first_sheet() {
        let bytes = xlsx_bytes(&[("US", 100.0), ("JP", 30.5)]);
        let table = DataLoader::load_bytes(&bytes, SourceFormat::Spreadsheet).unwrap();

        assert_eq!(
            table.columns(),
            vec!["Country", "Organic Google Search impressions", "Query"]
        );
        assert_eq!(table.row_count(), 2);

        let impressions = table
            .text_column("Organic Google Search impressions")
            .unwrap();
        assert_eq!(impressions[0].as_deref(), Some("100"));
        assert_eq!(impressions[1].as_deref(), Some("30.5"));
    }

    #[test]
    fn test_load_path_uses_extension() -> Result<(), Box<dyn std::error::Error>> {
        let mut csv = tempfile::Builder::new().suffix(".csv").tempfile()?;
        csv.write_all(b"Country,Organic Google Search impressions\nUS,5\n")?;
        let table = DataLoader::load_path(csv.path(), None)?;
        assert_eq!(table.row_count(), 1);

        let mut xlsx = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
        xlsx.write_all(&xlsx_bytes(&[("FR", 7.0)]))?;
        let table = DataLoader::load_path(xlsx.path(), None)?;
        assert_eq!(table.text_column("Country")?[0].as_deref(), Some("FR"));

        Ok(())
    }

    #[test]
    fn test_load_path_missing_file() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let err = DataLoader::load_path(&path, Some(SourceFormat::Text)).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("Queries.XLSX")),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("export.ods")),
            SourceFormat::Spreadsheet
        );
        assert_eq!(SourceFormat::from_path(Path::new("export.csv")), SourceFormat::Text);
        assert_eq!(SourceFormat::from_path(Path::new("export")), SourceFormat::Text);
    }

    #[test]
    fn test_float_text() {
        assert_eq!(float_text(100.0), "100");
        assert_eq!(float_text(-5.0), "-5");
        assert_eq!(float_text(2.5), "2.5");
    }
}
