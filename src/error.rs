//! Crate-wide error type.

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum AuditError {
    // Catalog errors
    #[error("malformed rule record at line {line}: expected 10 fields, found {found}")]
    MalformedRuleRecord { line: usize, found: usize },
    #[error("unknown check strategy `{strategy}` at line {line}")]
    UnknownStrategy { strategy: String, line: usize },
    #[error("invalid required flag `{value}` at line {line}, expected `yes` or `no`")]
    InvalidRequiredFlag { value: String, line: usize },
    #[error("duplicate rule name `{0}`")]
    DuplicateRuleName(String),
    #[error("rule `{rule}` field `{field}` contains the record separator and cannot be serialized")]
    SeparatorInField { rule: String, field: &'static str },
    #[error("rule not found: {0}")]
    UnknownRule(String),

    // Evaluation errors
    #[error("regex compile failed for rule `{rule}`: {source}")]
    RegexCompile {
        rule: String,
        #[source]
        source: RegexError,
    },

    // Retrieval errors
    #[error("`{0}` is not a valid show command")]
    InvalidShowCommand(String),
    #[error("fetch from {device} failed: {reason}")]
    DeviceFetch { device: String, reason: String },
    #[error("device {device} has unsupported device type `{device_type}`")]
    UnsupportedDeviceType { device: String, device_type: String },
    #[error("device inventory error: {0}")]
    Inventory(String),

    // Transport and base errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON parse failed: {0}")]
    Json(#[from] SerdeJsonError),
    #[error("IO operation failed: {0}")]
    Io(#[from] IoError),
}

// Crate-wide Result type
pub type AuditResult<T> = Result<T, AuditError>;
