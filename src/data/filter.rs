use super::criteria::FilterCriteria;
use super::model::{ResponseRow, ResponseTable};
use super::schema::{find_likert, is_text_column, LIKERT_SCALE};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// FilteredResult – a view over the rows that passed
// ---------------------------------------------------------------------------

/// Rows of a [`ResponseTable`] that satisfied a [`FilterCriteria`], in table order.
#[derive(Debug, Clone)]
pub struct FilteredResult<'a> {
    table: &'a ResponseTable,
    indices: Vec<usize>,
}

impl<'a> FilteredResult<'a> {
    pub fn table(&self) -> &'a ResponseTable {
        self.table
    }

    /// Positions of the matching rows in the source table.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of matching responses.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a ResponseRow> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.rows[i])
    }

    /// Apply further criteria to this result.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredResult<'a> {
        FilteredResult {
            table: self.table,
            indices: matching(self.table, self.indices.iter().copied(), criteria),
        }
    }

    /// `"Response {n}: {text}"` for every matching row, numbered from 1.
    pub fn text_projection(
        &self,
        column: &str,
    ) -> Result<impl Iterator<Item = String> + '_, FilterError> {
        if !is_text_column(column) {
            return Err(FilterError::UnknownColumn(column.to_string()));
        }
        let table: &ResponseTable = self.table;
        let col = table.column_position(column);
        Ok(self.indices.iter().enumerate().map(move |(n, &i)| {
            let text = col
                .and_then(|c| table.rows[i].values.get(c))
                .map(|v| v.as_text())
                .unwrap_or_default();
            format!("Response {}: {text}", n + 1)
        }))
    }

    /// How many matching rows answered 1, 2, 3, 4 and 5 to a Likert question.
    pub fn distribution(&self, question: &str) -> Result<[usize; 5], FilterError> {
        let (_, q) = find_likert(question).ok_or_else(|| FilterError::UnknownColumn(question.to_string()))?;
        let mut counts = [0usize; 5];
        let Some(col) = self.table.column_position(q.column) else {
            return Ok(counts);
        };
        for row in self.rows() {
            let Some(v) = row.values.get(col).and_then(|v| v.as_f64()) else {
                continue;
            };
            if let Some(slot) = LIKERT_SCALE.iter().position(|&s| f64::from(s) == v) {
                counts[slot] += 1;
            }
        }
        Ok(counts)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the rows of `table` that pass every constraint in `criteria`.
///
/// A row passes a constraint when its value in that column reads as a number
/// equal to the required value. Null, non-numeric and missing-column values
/// never pass; unconstrained fields are not checked at all.
pub fn filter<'a>(table: &'a ResponseTable, criteria: &FilterCriteria) -> FilteredResult<'a> {
    let indices = matching(table, 0..table.len(), criteria);
    log::debug!("filter [{criteria}] matched {} of {} rows", indices.len(), table.len());
    FilteredResult { table, indices }
}

/// Number of rows in a result.
pub fn count_of(result: &FilteredResult<'_>) -> usize {
    result.len()
}

fn matching(
    table: &ResponseTable,
    candidates: impl Iterator<Item = usize>,
    criteria: &FilterCriteria,
) -> Vec<usize> {
    // Resolve columns once; a column absent from the file can never match.
    let predicates: Vec<(Option<usize>, f64)> = criteria
        .predicates()
        .map(|(column, wanted)| (table.column_position(column), wanted))
        .collect();

    candidates
        .filter(|&i| {
            let row = &table.rows[i];
            predicates.iter().all(|&(col, wanted)| {
                col.and_then(|c| row.values.get(c))
                    .and_then(|v| v.as_f64())
                    .is_some_and(|v| v == wanted)
            })
        })
        .collect()
}
