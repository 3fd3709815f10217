use graxx_core::{GraxxError, Result};

/// Iterates one column of a row-major matrix over the rows `[offset, limit)`.
///
/// The iterator is single-pass. [`ColumnIter::try_next`] reports why it
/// stopped; the [`Iterator`] impl simply ends.
#[derive(Debug, Clone)]
pub struct ColumnIter<'a> {
    rows: &'a [Vec<f64>],
    column: usize,
    row: usize,
    limit: usize,
}

impl<'a> ColumnIter<'a> {
    /// Iterate `column` over every row.
    pub fn new(rows: &'a [Vec<f64>], column: usize) -> Self {
        Self::with_range(rows, column, 0, None)
    }

    /// Iterate `column` from row `offset` up to, but excluding, `limit`.
    /// `None` runs to the last row; limits past the end are capped.
    pub fn with_range(
        rows: &'a [Vec<f64>],
        column: usize,
        offset: usize,
        limit: Option<usize>,
    ) -> Self {
        let limit = limit.map_or(rows.len(), |l| l.min(rows.len()));
        Self {
            rows,
            column,
            row: offset,
            limit,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Next value, or `Exhausted` once the limit is reached.
    pub fn try_next(&mut self) -> Result<f64> {
        if self.row >= self.limit {
            return Err(GraxxError::Exhausted {
                column: self.column,
                row: self.row,
                limit: self.limit,
            });
        }
        let row = &self.rows[self.row];
        let value = row
            .get(self.column)
            .copied()
            .ok_or(GraxxError::ColumnOutOfRange {
                column: self.column,
                row: self.row,
                width: row.len(),
            })?;
        self.row += 1;
        Ok(value)
    }
}

impl Iterator for ColumnIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.limit.saturating_sub(self.row)))
    }
}
