use thiserror::Error;

/// A structural check on the header block that did not hold.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("does not look like a SEB export ({rule} check failed: {message})")]
pub struct LayoutError {
    pub rule: &'static str,
    pub message: String,
}

impl LayoutError {
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellError {
    #[error("cell is empty")]
    Missing,

    #[error("expected a date in {format} format, found {found:?}")]
    Date { format: &'static str, found: String },

    #[error("expected a decimal number, found {found:?}")]
    Decimal { found: String },

    #[error("expected text, found {found:?}")]
    Text { found: String },
}

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Value error at row {row}, column {column}: {source}")]
    Value {
        row: usize,
        column: &'static str,
        #[source]
        source: CellError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to open XLSX: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, StatementError>;
