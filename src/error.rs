use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a failed shuffle, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Write,
    Config,
}

#[derive(Error, Debug)]
pub enum ShuffleError {
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing delimited rows in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Error serializing rows: {source}")]
    Serialize {
        #[source]
        source: csv::Error,
    },

    #[error("Error writing to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShuffleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShuffleError::NotFound { .. } => ErrorKind::NotFound,
            ShuffleError::Read { .. } | ShuffleError::Parse { .. } => ErrorKind::Parse,
            ShuffleError::Serialize { .. } | ShuffleError::Write { .. } => ErrorKind::Write,
            ShuffleError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShuffleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_failures_count_as_parse_errors() {
        let err = ShuffleError::Read {
            path: PathBuf::from("in.csv.gz"),
            source: io::Error::new(io::ErrorKind::InvalidData, "corrupt deflate stream"),
        };
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("in.csv.gz"));
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = ShuffleError::NotFound {
            path: PathBuf::from("/missing/data.csv"),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Input file not found: /missing/data.csv");
    }
}
