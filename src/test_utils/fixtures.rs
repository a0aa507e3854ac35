use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::registry::{InferenceRule, Limits, REGISTRY_FILE, Registry, RegistryStore, SkillDescriptor};

/// Isolated skills directory with a registry that tests build up in memory.
///
/// Layout: `<root>/skills/registry.json` plus skill documents beneath
/// `<root>/skills/`. Call [`SkillsFixture::save_registry`] to persist the
/// in-memory registry.
pub struct SkillsFixture {
    pub temp_dir: TempDir,
    skills_dir: PathBuf,
    registry: Registry,
}

impl SkillsFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let skills_dir = temp_dir.path().join("skills");
        std::fs::create_dir_all(&skills_dir).expect("Failed to create skills dir");

        println!("[FIXTURE] Created skills directory: {:?}", skills_dir);

        Self {
            temp_dir,
            skills_dir,
            registry: Registry::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn skills_dir(&self) -> &Path {
        &self.skills_dir
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Create a file relative to the fixture root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write a skill document and register it.
    pub fn add_skill(&mut self, id: &str, relative_path: &str, content: &str) -> PathBuf {
        let path = self.create_file(&format!("skills/{relative_path}"), content);
        self.register(id, relative_path);
        path
    }

    /// Write a skill whose measured size is exactly `lines` lines.
    pub fn add_skill_with_lines(&mut self, id: &str, lines: usize) -> PathBuf {
        let content = (1..=lines.max(1))
            .map(|n| format!("{id} line {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.add_skill(id, &format!("{id}/SKILL.md"), &content)
    }

    /// Register a skill without writing its document.
    pub fn register(&mut self, id: &str, relative_path: &str) {
        self.registry.skills.insert(
            id.to_string(),
            SkillDescriptor {
                path: relative_path.to_string(),
                max_lines: None,
                tags: Vec::new(),
                description: None,
            },
        );
    }

    pub fn add_rule(&mut self, skill: &str, patterns: &[&str]) {
        self.registry.inference.rules.push(InferenceRule {
            skill: skill.to_string(),
            patterns: patterns.iter().map(ToString::to_string).collect(),
        });
    }

    pub fn set_defaults(&mut self, ids: &[&str]) {
        self.registry.defaults.always_load = ids.iter().map(ToString::to_string).collect();
    }

    pub const fn set_limits(&mut self, max_skills_per_plan: usize, max_total_lines: usize) {
        self.registry.limits = Limits {
            max_skills_per_plan,
            max_total_lines,
        };
    }

    /// Persist the in-memory registry as `registry.json`.
    pub fn save_registry(&self) -> PathBuf {
        let raw = serde_json::to_string_pretty(&self.registry).expect("Failed to encode registry");
        self.write_registry(&raw)
    }

    /// Write raw registry content, valid or not.
    pub fn write_registry(&self, raw: &str) -> PathBuf {
        let path = self.skills_dir.join(REGISTRY_FILE);
        std::fs::write(&path, raw).expect("Failed to write registry");
        path
    }

    /// Store over the in-memory registry, without going through `registry.json`.
    pub fn store(&self) -> RegistryStore {
        RegistryStore::from_parts(self.skills_dir.clone(), self.registry.clone())
    }
}

impl Default for SkillsFixture {
    fn default() -> Self {
        Self::new()
    }
}
