use std::path::Path;

use rrr_skills::core::{LoadOptions, PipelineResult, infer, record_load, resolve_and_load};
use rrr_skills::registry::{SkillsSearch, find_registry_location, load_registry};
use rrr_skills::test_utils::fixtures::SkillsFixture;

fn isolated_search(root: &Path) -> SkillsSearch {
    SkillsSearch {
        explicit: None,
        project: root.join("project/.claude/skills"),
        global: Some(root.join("home/.claude/skills")),
        bundled: root.join("bundled/skills"),
    }
}

fn fixture_with_registry() -> SkillsFixture {
    let mut fixture = SkillsFixture::new();
    fixture.add_skill("core", "core/SKILL.md", "# Core");
    fixture.add_skill("testing", "testing/SKILL.md", "# Testing\nrun the suite");
    fixture.set_defaults(&["core"]);
    fixture.add_rule("testing", &["test"]);
    fixture.save_registry();
    fixture
}

#[test]
fn explicit_registry_location_loads_from_disk() {
    let fixture = fixture_with_registry();
    let search =
        isolated_search(fixture.root()).with_explicit(Some(fixture.skills_dir().to_path_buf()));

    assert_eq!(
        find_registry_location(&search).as_deref(),
        Some(fixture.skills_dir())
    );

    let store = load_registry(&search).expect("registry should load");
    assert_eq!(infer("Add tests", store.registry()), vec!["testing"]);

    let result = resolve_and_load("Add tests", &LoadOptions::default(), &search);
    assert_eq!(result.loaded_ids(), vec!["core", "testing"]);
    assert_eq!(result.total_lines(), 3);
}

#[test]
fn no_registry_location_yields_empty_result() {
    let fixture = SkillsFixture::new();
    let search = isolated_search(fixture.root());

    assert!(find_registry_location(&search).is_none());
    assert!(load_registry(&search).is_none());
    assert_eq!(
        resolve_and_load("anything", &LoadOptions::default(), &search),
        PipelineResult::empty()
    );
}

#[test]
fn load_result_is_recorded() {
    let fixture = fixture_with_registry();
    let search =
        isolated_search(fixture.root()).with_explicit(Some(fixture.skills_dir().to_path_buf()));
    let result = resolve_and_load("Add tests", &LoadOptions::default(), &search);

    let log_dir = fixture.root().join(".planning/logs");
    let path = record_load(
        &log_dir,
        "PLAN.md",
        &result.loaded_ids(),
        result.total_lines(),
        result.limits.max_total_lines,
    )
    .unwrap();

    assert!(path.starts_with(&log_dir));
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("Skills loaded: core, testing (3 lines)"));
    assert!(content.contains("Total: 3 lines / 1000 max"));
}
