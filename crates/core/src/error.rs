use thiserror::Error;

/// Top-level error type shared by every graxx crate.
#[derive(Debug, Error)]
pub enum GraxxError {
    #[error("index {index} is outside the bounds of window of size {size}")]
    OutOfBounds { index: usize, size: usize },

    #[error("cannot coerce {value:?} to a non-negative integer: {reason}")]
    Coercion { value: String, reason: String },

    #[error("capacity must be greater than zero (got {0})")]
    InvalidCapacity(usize),

    #[error("percentile must be within 1..=100 (got {0})")]
    InvalidPercentile(u32),

    #[error("matrix column {column} does not have {row} rows within limit {limit}")]
    Exhausted { column: usize, row: usize, limit: usize },

    #[error("matrix row {row} has {width} columns, cannot read column {column}")]
    ColumnOutOfRange { column: usize, row: usize, width: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = GraxxError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_names_index_and_size() {
        let err = GraxxError::OutOfBounds { index: 7, size: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 is outside the bounds of window of size 3"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: GraxxError = io.into();
        assert!(matches!(err, GraxxError::Io { .. }));
    }
}
