use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::model::{CellValue, ResponseRow, ResponseTable};
use super::schema::is_text_column;
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// DataSource – load-once access to the survey file
// ---------------------------------------------------------------------------

/// The configured survey file and, once read, its parsed table.
///
/// The first successful [`DataSource::load`] caches the table; later calls
/// hand out the same `Arc` without touching the file again. A failed load
/// caches nothing, so the next call retries.
#[derive(Debug)]
pub struct DataSource {
    path: PathBuf,
    table: OnceCell<Arc<ResponseTable>>,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DataSource {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn load(&self) -> Result<Arc<ResponseTable>, FilterError> {
        self.table
            .get_or_try_init(|| load_csv(&self.path).map(Arc::new))
            .cloned()
    }

    /// Drop the cached table and read the file again.
    pub fn reload(&mut self) -> Result<Arc<ResponseTable>, FilterError> {
        self.table.take();
        self.load()
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one response per record.
/// Empty fields become nulls. Free-text answer columns keep the field as
/// written; elsewhere numeric-looking fields become numbers.
pub fn load_csv(path: &Path) -> Result<ResponseTable, FilterError> {
    let unavailable = |reason: String| FilterError::unavailable(path, reason);

    let mut reader = csv::Reader::from_path(path).map_err(|e| unavailable(format!("opening CSV: {e}")))?;
    let column_names: Vec<String> = reader
        .headers()
        .map_err(|e| unavailable(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if column_names.iter().all(|h| h.is_empty()) {
        return Err(unavailable("no header row".to_string()));
    }

    let free_text: Vec<bool> = column_names.iter().map(|h| is_text_column(h)).collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| unavailable(format!("CSV row {}: {e}", row_no + 1)))?;
        let values = record
            .iter()
            .zip(&free_text)
            .map(|(field, &is_text)| {
                if is_text {
                    CellValue::text(field)
                } else {
                    CellValue::parse(field)
                }
            })
            .collect();
        rows.push(ResponseRow { values });
    }

    let table = ResponseTable::new(column_names, rows);
    log::info!(
        "Loaded {} responses with {} columns from {}",
        table.len(),
        table.column_names.len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_header_and_typed_cells() {
        let file = csv_file(
            "gender,age,Q7_1,challenges you found in this process\n\
             1,0,3.0,\"finding time, mostly\"\n\
             0,,4,\n",
        );
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names[3], "challenges you found in this process");
        assert_eq!(table.value(0, "Q7_1"), Some(&CellValue::Float(3.0)));
        assert_eq!(
            table.value(0, "challenges you found in this process"),
            Some(&CellValue::Text("finding time, mostly".into()))
        );
        assert_eq!(table.value(1, "age"), Some(&CellValue::Null));
    }

    #[test]
    fn numeric_looking_answers_are_listed_as_written() {
        let file = csv_file("gender,challenges you found in this process\n1,007\n1,1e3\n0,2.50\n1,+5\n");
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.value(0, "gender"), Some(&CellValue::Integer(1)));

        let result = crate::data::filter::filter(&table, &crate::FilterCriteria::any());
        let lines: Vec<String> = result
            .text_projection("challenges you found in this process")
            .unwrap()
            .collect();
        assert_eq!(
            lines,
            vec![
                "Response 1: 007",
                "Response 2: 1e3",
                "Response 3: 2.50",
                "Response 4: +5"
            ]
        );
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, FilterError::DataUnavailable { .. }));
    }

    #[test]
    fn empty_file_is_unavailable() {
        let file = csv_file("");
        assert!(matches!(
            load_csv(file.path()),
            Err(FilterError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn ragged_record_is_unavailable() {
        let file = csv_file("gender,age\n1,0\n1,0,7\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("CSV row 2"), "{err}");
    }

    #[test]
    fn source_caches_until_reload() {
        let file = csv_file("gender\n1\n");
        let mut source = DataSource::new(file.path());
        assert!(!source.is_loaded());

        let first = source.load().unwrap();
        std::fs::write(file.path(), "gender\n1\n0\n").unwrap();
        let second = source.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        let reloaded = source.reload().unwrap();
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let source = DataSource::new(&path);
        assert!(source.load().is_err());

        std::fs::write(&path, "gender\n0\n").unwrap();
        assert_eq!(source.load().unwrap().len(), 1);
    }
}
