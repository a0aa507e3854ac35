use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SkillsError};
use crate::utils::fs::read_optional;

use super::types::{Registry, SkillDescriptor};

/// File name of the catalog inside a skills directory.
pub const REGISTRY_FILE: &str = "registry.json";

/// Read access to skill documents, keyed by registry-relative path.
pub trait SkillStorage {
    /// Read a skill document. `Ok(None)` means the file does not exist.
    fn read(&self, relative_path: &str) -> Result<Option<String>>;

    /// Location used in diagnostics for a relative path.
    fn describe(&self, relative_path: &str) -> String {
        relative_path.to_string()
    }
}

/// Candidate skills directories, searched in order.
#[derive(Debug, Clone)]
pub struct SkillsSearch {
    /// Explicit directory from `--skills-dir`, config or `RRR_SKILLS_DIR`.
    pub explicit: Option<PathBuf>,
    /// Project-local `.claude/skills`.
    pub project: PathBuf,
    /// User-level `~/.claude/skills`.
    pub global: Option<PathBuf>,
    /// Development fallback shipped with the crate.
    pub bundled: PathBuf,
}

impl SkillsSearch {
    /// Standard search rooted at `cwd`.
    pub fn standard(cwd: &Path) -> Self {
        Self {
            explicit: None,
            project: cwd.join(".claude").join("skills"),
            global: dirs::home_dir().map(|home| home.join(".claude").join("skills")),
            bundled: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("skills"),
        }
    }

    #[must_use]
    pub fn with_explicit(mut self, dir: Option<PathBuf>) -> Self {
        self.explicit = dir;
        self
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Path> {
        self.explicit
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.project.as_path()))
            .chain(self.global.iter().map(PathBuf::as_path))
            .chain(std::iter::once(self.bundled.as_path()))
    }
}

/// First existing skills directory, or `None` when no candidate exists.
pub fn find_registry_location(search: &SkillsSearch) -> Option<PathBuf> {
    if let Some(explicit) = search.explicit.as_deref().filter(|dir| !dir.is_dir()) {
        warn!(
            dir = %explicit.display(),
            "Skills directory not found, searching standard locations"
        );
    }

    let found = search.candidates().find(|dir| dir.is_dir()).map(Path::to_path_buf);
    match &found {
        Some(dir) => debug!(dir = %dir.display(), "resolved skills directory"),
        None => debug!("no skills directory found"),
    }
    found
}

/// A loaded registry together with the directory its skill paths are relative to.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    base_dir: PathBuf,
    registry: Registry,
}

impl RegistryStore {
    /// Read and parse `registry.json` from a skills directory.
    pub fn open(skills_dir: &Path) -> Result<Self> {
        let path = skills_dir.join(REGISTRY_FILE);
        let raw = read_optional(&path)?
            .ok_or_else(|| SkillsError::RegistryMissing(path.display().to_string()))?;
        let registry: Registry =
            serde_json::from_str(&raw).map_err(|err| SkillsError::RegistryInvalid {
                path: path.clone(),
                reason: err.to_string(),
            })?;

        for dangling in registry.dangling_references() {
            warn!(
                skill = %dangling.skill_id,
                source = %dangling.source,
                "registry references unknown skill"
            );
        }

        Ok(Self::from_parts(skills_dir.to_path_buf(), registry))
    }

    pub const fn from_parts(base_dir: PathBuf, registry: Registry) -> Self {
        Self { base_dir, registry }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn skill_path(&self, descriptor: &SkillDescriptor) -> PathBuf {
        self.base_dir.join(&descriptor.path)
    }
}

impl SkillStorage for RegistryStore {
    fn read(&self, relative_path: &str) -> Result<Option<String>> {
        read_optional(self.base_dir.join(relative_path))
    }

    fn describe(&self, relative_path: &str) -> String {
        self.base_dir.join(relative_path).display().to_string()
    }
}

/// Resolve and open the registry; any failure degrades to `None` with a warning.
pub fn load_registry(search: &SkillsSearch) -> Option<RegistryStore> {
    let Some(dir) = find_registry_location(search) else {
        warn!("Skills directory not found");
        return None;
    };

    match RegistryStore::open(&dir) {
        Ok(store) => Some(store),
        Err(err) => {
            warn!(error = %err, "Skills registry unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::SkillsFixture;

    fn search_in(root: &Path) -> SkillsSearch {
        SkillsSearch {
            explicit: None,
            project: root.join("project/.claude/skills"),
            global: Some(root.join("home/.claude/skills")),
            bundled: root.join("bundled/skills"),
        }
    }

    #[test]
    fn project_directory_wins_over_global_and_bundled() {
        let fixture = SkillsFixture::new();
        let root = fixture.root();
        for dir in ["project/.claude/skills", "home/.claude/skills", "bundled/skills"] {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }

        let found = find_registry_location(&search_in(root)).unwrap();
        assert_eq!(found, root.join("project/.claude/skills"));
    }

    #[test]
    fn falls_back_to_global_then_bundled() {
        let fixture = SkillsFixture::new();
        let root = fixture.root();
        std::fs::create_dir_all(root.join("bundled/skills")).unwrap();
        assert_eq!(
            find_registry_location(&search_in(root)).unwrap(),
            root.join("bundled/skills")
        );

        std::fs::create_dir_all(root.join("home/.claude/skills")).unwrap();
        assert_eq!(
            find_registry_location(&search_in(root)).unwrap(),
            root.join("home/.claude/skills")
        );
    }

    #[test]
    fn explicit_directory_is_searched_first() {
        let fixture = SkillsFixture::new();
        let root = fixture.root();
        std::fs::create_dir_all(root.join("project/.claude/skills")).unwrap();
        std::fs::create_dir_all(root.join("custom")).unwrap();

        let search = search_in(root).with_explicit(Some(root.join("custom")));
        assert_eq!(find_registry_location(&search).unwrap(), root.join("custom"));
    }

    #[test]
    fn missing_explicit_directory_falls_through() {
        let fixture = SkillsFixture::new();
        let root = fixture.root();
        std::fs::create_dir_all(root.join("project/.claude/skills")).unwrap();

        let search = search_in(root).with_explicit(Some(root.join("nowhere")));
        assert_eq!(
            find_registry_location(&search).unwrap(),
            root.join("project/.claude/skills")
        );
    }

    #[test]
    fn no_directory_resolves_to_none() {
        let fixture = SkillsFixture::new();
        assert!(find_registry_location(&search_in(fixture.root())).is_none());
        assert!(load_registry(&search_in(fixture.root())).is_none());
    }

    #[test]
    fn open_reports_missing_registry_file() {
        let fixture = SkillsFixture::new();
        let err = RegistryStore::open(fixture.root()).unwrap_err();
        assert!(matches!(err, SkillsError::RegistryMissing(_)));
    }

    #[test]
    fn open_accepts_null_advisory_fields() {
        let fixture = SkillsFixture::new();
        fixture.write_registry(
            r#"{ "skills": { "core": { "path": "core.md", "tags": null, "max_lines": "80" } } }"#,
        );

        let store = RegistryStore::open(fixture.skills_dir()).unwrap();
        let core = store.registry().get("core").unwrap();
        assert!(core.tags.is_empty());
        assert_eq!(core.max_lines, Some(80));
    }

    #[test]
    fn malformed_registry_degrades_to_none() {
        let fixture = SkillsFixture::new();
        fixture.write_registry("{ not json");

        assert!(matches!(
            RegistryStore::open(fixture.skills_dir()).unwrap_err(),
            SkillsError::RegistryInvalid { .. }
        ));

        let search = SkillsSearch {
            explicit: Some(fixture.skills_dir().to_path_buf()),
            ..search_in(fixture.root())
        };
        assert!(load_registry(&search).is_none());
    }

    #[test]
    fn storage_reads_relative_to_base_dir() {
        let mut fixture = SkillsFixture::new();
        fixture.add_skill("core", "core/SKILL.md", "# Core\nrules");
        fixture.save_registry();

        let store = RegistryStore::open(fixture.skills_dir()).unwrap();
        assert_eq!(
            store.read("core/SKILL.md").unwrap().as_deref(),
            Some("# Core\nrules")
        );
        assert!(store.read("nope/SKILL.md").unwrap().is_none());
        assert!(store.describe("core/SKILL.md").ends_with("SKILL.md"));
    }
}
