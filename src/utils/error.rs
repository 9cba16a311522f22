// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// --- Line-level errors (recoverable: the line is skipped and counted) ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Malformed date token '{0}'")]
    Malformed(String),

    #[error("Date {month}/{day} is not a valid day in {year}")]
    OutOfRange { month: u32, day: u32, year: i32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("Non-numeric amount '{0}'")]
    NonNumeric(String),

    #[error("Misplaced thousands separator in amount '{0}'")]
    BadGrouping(String),

    #[error("Conflicting sign markers in amount '{0}'")]
    ConflictingSign(String),

    #[error("Zero amount '{0}'")]
    Zero(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error(transparent)]
    Date(#[from] DateParseError),

    #[error(transparent)]
    Amount(#[from] AmountParseError),
}

// --- File / folder errors ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unreadable PDF '{}': {reason}", .path.display())]
pub struct UnreadablePdfError {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Input folder '{}' does not exist", .0.display())]
    MissingFolder(PathBuf),

    #[error("Input folder '{}' could not be read: {source}", .path.display())]
    InputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Unreadable(#[from] UnreadablePdfError),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Regular expression error: {0}")]
    RegexError(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Statement source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No readable PDF statements in '{}'", .0.display())]
    NoReadablePdfs(PathBuf),

    #[error("No transactions found in {files} statement(s); the layout may not be recognized")]
    NoTransactionsFound { files: usize },
}
