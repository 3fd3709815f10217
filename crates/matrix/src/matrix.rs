use crate::column::ColumnIter;

/// Minimal read-only view shared by the matrix types.
pub trait RealMatrix {
    fn row_dimension(&self) -> usize;

    fn column_dimension(&self) -> usize;

    /// Row-major backing data.
    fn data(&self) -> &[Vec<f64>];

    /// Iterate one column over every row.
    fn column(&self, column: usize) -> ColumnIter<'_> {
        ColumnIter::new(self.data(), column)
    }
}

/// Rectangular row-major matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseMatrix {
    rows: Vec<Vec<f64>>,
}

impl DenseMatrix {
    /// Wrap `rows`; returns `None` if the rows differ in width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        rows.iter()
            .all(|r| r.len() == width)
            .then_some(Self { rows })
    }
}

impl RealMatrix for DenseMatrix {
    fn row_dimension(&self) -> usize {
        self.rows.len()
    }

    fn column_dimension(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    fn data(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// A matrix with a known number of rows and no columns at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroColumnMatrix {
    rows: Vec<Vec<f64>>,
}

impl ZeroColumnMatrix {
    pub fn new(rows: usize) -> Self {
        Self {
            rows: vec![Vec::new(); rows],
        }
    }
}

impl RealMatrix for ZeroColumnMatrix {
    fn row_dimension(&self) -> usize {
        self.rows.len()
    }

    fn column_dimension(&self) -> usize {
        0
    }

    fn data(&self) -> &[Vec<f64>] {
        &self.rows
    }
}
