use rrr_skills::core::{
    LoadOutcome, LoadOptions, PlanDescriptor, SelectionBasis, SkillsMode, load, plan_header,
    select, select_and_load,
};
use rrr_skills::test_utils::fixtures::SkillsFixture;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Registry from the budget scenario: core(10), a(50), b(60), defaults [core].
fn budget_fixture(max_skills: usize, max_lines: usize) -> SkillsFixture {
    let mut fixture = SkillsFixture::new();
    fixture.add_skill_with_lines("core", 10);
    fixture.add_skill_with_lines("a", 50);
    fixture.add_skill_with_lines("b", 60);
    fixture.set_defaults(&["core"]);
    fixture.set_limits(max_skills, max_lines);
    fixture
}

#[test]
fn budget_scenario_stops_before_b() {
    let fixture = budget_fixture(2, 100);
    let store = fixture.store();
    let plan = "---\nskills:\n  - a\n  - b\n---\n";

    let result = select_and_load(plan, &LoadOptions::default(), &store);

    assert_eq!(result.selection.ids, ids(&["core", "a", "b"]));
    assert_eq!(result.loaded_ids(), ids(&["core", "a"]));
    assert_eq!(result.total_lines(), 60);

    let b = result.report.steps.iter().find(|step| step.id == "b").unwrap();
    assert!(!b.outcome.is_loaded());
}

#[test]
fn budget_scenario_with_room_for_count_hits_size_limit() {
    let fixture = budget_fixture(3, 100);
    let store = fixture.store();
    let plan = "---\nskills:\n  - a\n  - b\n---\n";

    let result = select_and_load(plan, &LoadOptions::default(), &store);

    assert_eq!(result.loaded_ids(), ids(&["core", "a"]));
    assert_eq!(result.total_lines(), 60);
    assert_eq!(
        result.report.steps[2].outcome,
        LoadOutcome::SkippedLimitSize {
            lines: Some(60),
            limit: 100
        }
    );
}

#[test]
fn minimal_mode_does_not_prepend_defaults() {
    let fixture = budget_fixture(5, 1000);
    let plan = "---\nskills:\n  - a\nskills_mode: minimal\n---\n";

    let descriptor = plan_header::parse(plan);
    assert_eq!(descriptor.mode, SkillsMode::Minimal);

    let selection = select(&descriptor, plan, fixture.registry());
    assert_eq!(selection.ids, ids(&["a"]));
}

#[test]
fn empty_plan_selects_only_defaults() {
    let fixture = budget_fixture(5, 1000);

    let result = select_and_load("", &LoadOptions::default(), &fixture.store());

    assert_eq!(result.selection.ids, ids(&["core"]));
    assert_eq!(result.selection.basis, SelectionBasis::Inferred);
    assert_eq!(result.loaded_ids(), ids(&["core"]));
    assert_eq!(result.total_lines(), 10);
}

#[test]
fn unknown_default_is_skipped_without_aborting() {
    let mut fixture = budget_fixture(5, 1000);
    fixture.set_defaults(&["missing", "core"]);
    let plan = "---\nskills:\n  - a\n---\n";

    let result = select_and_load(plan, &LoadOptions::default(), &fixture.store());

    assert_eq!(result.selection.ids, ids(&["missing", "core", "a"]));
    assert_eq!(result.loaded_ids(), ids(&["core", "a"]));
    assert_eq!(result.report.steps[0].outcome, LoadOutcome::SkippedNotFound);
}

#[test]
fn explicit_skills_suppress_inference() {
    let mut fixture = budget_fixture(5, 1000);
    fixture.add_rule("b", &["everything"]);
    let plan = "---\nskills:\n  - a\n---\neverything everywhere\n";

    let result = select_and_load(plan, &LoadOptions::default(), &fixture.store());

    assert_eq!(result.selection.basis, SelectionBasis::Explicit);
    assert!(!result.selection.ids.contains(&"b".to_string()));
}

#[test]
fn repeated_select_and_load_is_identical() {
    let fixture = budget_fixture(2, 100);
    let store = fixture.store();
    let descriptor = PlanDescriptor {
        explicit_skills: ids(&["b", "a"]),
        mode: SkillsMode::Standard,
    };

    let first = load(&select(&descriptor, "", store.registry()).ids, store.registry(), &store);
    let second = load(&select(&descriptor, "", store.registry()).ids, store.registry(), &store);

    assert_eq!(first.skills, second.skills);
    assert_eq!(first.loaded_ids(), ids(&["core", "b"]));
}
