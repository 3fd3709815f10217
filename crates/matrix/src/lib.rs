pub mod column;
pub mod matrix;
pub mod tsv;

pub use column::ColumnIter;
pub use matrix::{DenseMatrix, RealMatrix, ZeroColumnMatrix};
pub use tsv::{convert_columns, Cell, ColumnType, ValueAdapter};
