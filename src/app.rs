//! Per-invocation application context shared by command handlers.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::registry::{RegistryStore, SkillsSearch, load_registry};

pub struct AppContext {
    /// Directory the command runs against; relative paths resolve here.
    pub project_root: PathBuf,
    pub config: Config,
    pub search: SkillsSearch,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        Ok(Self::for_root(cli, project_root))
    }

    /// Build a context rooted at `project_root`.
    ///
    /// Configuration problems are reported and replaced by defaults so they
    /// never block loading.
    pub fn for_root(cli: &Cli, project_root: PathBuf) -> Self {
        let config = Config::load(cli.config.as_deref(), &project_root).unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring invalid configuration, using defaults");
            Config::default()
        });

        let explicit = cli
            .skills_dir
            .clone()
            .or_else(|| config.skills.dir.clone())
            .map(|dir| resolve_against(&project_root, dir));
        let search = SkillsSearch::standard(&project_root).with_explicit(explicit);

        let output_format = cli.output_format();
        if !output_format.use_colors() {
            colored::control::set_override(false);
        }

        debug!(root = %project_root.display(), ?output_format, "application context ready");

        Self {
            project_root,
            config,
            search,
            robot_mode: output_format.is_machine_readable(),
            output_format,
            verbosity: cli.verbose,
        }
    }

    /// Resolve and open the skills registry, or `None` with a warning.
    pub fn open_registry(&self) -> Option<RegistryStore> {
        load_registry(&self.search)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config.log_dir(&self.project_root)
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        resolve_against(&self.project_root, path.to_path_buf())
    }
}

fn resolve_against(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
