use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the survey table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV column ends up with.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Empty field in the source file.
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV field.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    /// Keep a field verbatim, for answers that are prose even when they look
    /// like numbers. Empty still means null.
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(s.to_string())
        }
    }

    /// Numeric view of the cell. Text that reads as a number counts too, so
    /// `"3"`, `3` and `3.0` compare equal. Null and NaN never do.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Null => return None,
        };
        if v.is_nan() { None } else { Some(v) }
    }

    /// Text as it should appear inside a response listing.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ResponseRow – one survey response
// ---------------------------------------------------------------------------

/// One row of the source file; values line up with [`ResponseTable::column_names`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRow {
    pub values: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// ResponseTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// All responses in file order.
    pub rows: Vec<ResponseRow>,
    column_index: HashMap<String, usize>,
}

impl ResponseTable {
    /// Build the table and its column lookup. Short rows are padded with nulls
    /// so every row has one value per column.
    pub fn new(column_names: Vec<String>, mut rows: Vec<ResponseRow>) -> Self {
        let column_index = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        for row in &mut rows {
            row.values.resize(column_names.len(), CellValue::Null);
        }
        ResponseTable {
            column_names,
            rows,
            column_index,
        }
    }

    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    /// Cell at `row` / `column`, or `None` when the column does not exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_position(column)?;
        self.rows.get(row)?.values.get(col)
    }

    /// Number of responses.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
