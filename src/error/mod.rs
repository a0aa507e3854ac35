//! Error handling for rrr-skills.
//!
//! This module provides:
//! - [`SkillsError`]: The main error enum for all loader operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Error payload used by robot output
//!
//! Most failures inside the selection pipeline never surface as errors; they
//! are recorded as skip outcomes or warnings. The variants here cover the
//! edges where a caller decides whether to degrade or report.

mod codes;

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for skills loading operations.
#[derive(Error, Debug)]
pub enum SkillsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Skills registry not found: {0}")]
    RegistryMissing(String),

    #[error("Skills registry invalid ({}): {reason}", .path.display())]
    RegistryInvalid { path: PathBuf, reason: String },

    #[error("Skill not found in registry: {0}")]
    SkillNotFound(String),

    #[error("Skill file not found: {}", .0.display())]
    SkillFileMissing(PathBuf),

    #[error("Failed to write load log {}: {reason}", .path.display())]
    LogWriteFailure { path: PathBuf, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SkillsError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::RegistryMissing(_) => ErrorCode::RegistryMissing,
            Self::RegistryInvalid { .. } => ErrorCode::RegistryInvalid,
            Self::SkillNotFound(_) => ErrorCode::SkillNotFound,
            Self::SkillFileMissing(_) => ErrorCode::SkillFileMissing,
            Self::LogWriteFailure { .. } => ErrorCode::LogWriteFailure,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Json(_) => ErrorCode::SerializationError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::SkillNotFound(id) => Some(serde_json::json!({ "skill_id": id })),
            Self::SkillFileMissing(path) => Some(serde_json::json!({ "path": path })),
            Self::RegistryInvalid { path, reason } => {
                Some(serde_json::json!({ "path": path, "reason": reason }))
            }
            Self::LogWriteFailure { path, .. } => Some(serde_json::json!({ "path": path })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_skills_error(self)
    }
}

/// A structured error with machine-readable code and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "SKILL_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether the loader keeps going after this error
    pub recoverable: bool,

    /// Error category (e.g., "registry", "config")
    pub category: String,
}

impl StructuredError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            numeric_code: code.numeric(),
            message: message.into(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    #[must_use]
    pub fn from_skills_error(err: &SkillsError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&SkillsError> for StructuredError {
    fn from(err: &SkillsError) -> Self {
        Self::from_skills_error(err)
    }
}

/// Result type alias using `SkillsError`.
pub type Result<T> = std::result::Result<T, SkillsError>;
