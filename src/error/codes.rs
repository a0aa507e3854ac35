//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Skill errors
//! - 2xx: Registry errors
//! - 3xx: Config errors
//! - 6xx: Storage errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `SkillNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Skill errors (1xx)
    // ========================================
    /// E101: Identifier is not present in the registry's skills map
    SkillNotFound,
    /// E102: Registry entry points at a file that does not exist
    SkillFileMissing,

    // ========================================
    // Registry errors (2xx)
    // ========================================
    /// E201: No skills directory or registry file could be resolved
    RegistryMissing,
    /// E202: Registry file exists but is not a valid registry document
    RegistryInvalid,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E601: Load log could not be written
    LogWriteFailure,
    /// E602: IO operation failed
    IoError,
    /// E603: Serialization/deserialization failed
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `SkillNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::SkillNotFound => 101,
            Self::SkillFileMissing => 102,
            Self::RegistryMissing => 201,
            Self::RegistryInvalid => 202,
            Self::ConfigInvalid => 301,
            Self::LogWriteFailure => 601,
            Self::IoError => 602,
            Self::SerializationError => 603,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::SkillNotFound => "Run `rrr-skills list` to see registered skills, or fix the identifier in the plan header",
            Self::SkillFileMissing => "Reinstall the skills directory or correct the skill's `path` in registry.json",
            Self::RegistryMissing => "Install skills into .claude/skills (project) or ~/.claude/skills (global), or pass --skills-dir",
            Self::RegistryInvalid => "Check registry.json for JSON syntax errors",
            Self::ConfigInvalid => "Check TOML syntax in the config file and the RRR_* environment variables",
            Self::LogWriteFailure => "Check write permissions on the log directory, or disable logging with --no-log",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
        }
    }

    /// Check if the loader continues after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::SkillNotFound
            | Self::SkillFileMissing
            | Self::RegistryMissing
            | Self::RegistryInvalid
            | Self::ConfigInvalid
            | Self::LogWriteFailure
            | Self::IoError => true,

            Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "skill",
            2 => "registry",
            3 => "config",
            6 => "storage",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::SkillNotFound,
            Self::SkillFileMissing,
            Self::RegistryMissing,
            Self::RegistryInvalid,
            Self::ConfigInvalid,
            Self::LogWriteFailure,
            Self::IoError,
            Self::SerializationError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
