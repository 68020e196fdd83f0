//! Unified application error type.
//! Every layer (store, sync, core, cli) returns AppError so failures surface
//! at the mutation boundary in one shape.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Remote store
    // ---------------------------
    /// Retries exhausted (or a non-retryable transport failure). Nothing was
    /// applied locally.
    #[error("Remote store unavailable for table '{table}' after {attempts} attempt(s): {reason}")]
    StoreUnavailable {
        table: String,
        attempts: u32,
        reason: String,
    },

    #[error("HTTP error {status} from remote store: {message}")]
    Http { status: u16, message: String },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    // ---------------------------
    // Parsing / user input
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid hierarchical id: {0}")]
    InvalidId(String),

    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid field assignment: {0}")]
    InvalidField(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No row with order key {0}")]
    RowNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for the failures the retry loop is allowed to absorb.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Io(_) => true,
            AppError::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
