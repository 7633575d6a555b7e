use thiserror::Error;

/// Errors surfaced by the kundali core.
///
/// Data-quality problems (missing houses, odd occupant entries, bad dates)
/// never become errors; they degrade to empty or unmarked output.
#[derive(Error, Debug)]
pub enum KundaliError {
    #[error("House number {0} is outside 1..=12")]
    HouseOutOfRange(i64),
    #[error("Report section '{section}' failed: {message}")]
    Source { section: String, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KundaliError>;
