use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillsError};

/// Directory holding the project-level config file.
pub const PROJECT_CONFIG_DIR: &str = ".rrr";
pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_LOG_DIR: &str = ".planning/logs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration for a project rooted at `project_root`.
    ///
    /// An explicit path (or `RRR_CONFIG`) replaces the global and project
    /// files. Environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        Self::load_with_env(explicit_path, project_root, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with a caller-supplied environment lookup.
    pub fn load_with_env<F>(explicit_path: Option<&Path>, project_root: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env("RRR_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides(&env);

        Ok(config)
    }

    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rrr").join(CONFIG_FILE))
    }

    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::project_path(project_root))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkillsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkillsError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.skills {
            self.skills.merge(patch);
        }
        if let Some(patch) = patch.log {
            self.log.merge(patch);
        }
    }

    fn apply_env_overrides<F>(&mut self, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env_string(env, "RRR_SKILLS_DIR") {
            self.skills.dir = Some(PathBuf::from(value));
        }
        if let Some(value) = env_string(env, "RRR_LOG_DIR") {
            self.log.dir = PathBuf::from(value);
        }
        if let Some(value) = env_bool(env, "RRR_LOG_ENABLED") {
            self.log.enabled = value;
        }
    }

    /// Log directory, resolved against `project_root` when relative.
    pub fn log_dir(&self, project_root: &Path) -> PathBuf {
        if self.log.dir.is_absolute() {
            self.log.dir.clone()
        } else {
            project_root.join(&self.log.dir)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Skills directory searched before the standard locations.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl SkillsConfig {
    fn merge(&mut self, patch: SkillsPatch) {
        if let Some(value) = patch.dir {
            self.dir = Some(value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            enabled: true,
        }
    }
}

impl LogConfig {
    fn merge(&mut self, patch: LogPatch) {
        if let Some(value) = patch.dir {
            self.dir = value;
        }
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub skills: Option<SkillsPatch>,
    pub log: Option<LogPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SkillsPatch {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LogPatch {
    pub dir: Option<PathBuf>,
    pub enabled: Option<bool>,
}

fn env_string<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).filter(|value| !value.trim().is_empty())
}

fn env_bool<F>(env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
